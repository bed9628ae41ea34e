//! Scripted interaction replay.
//!
//! A script is a list of `[[step]]` tables whose `action` picks the
//! operation. Pointer positions are surface pixels, exactly as a host would
//! deliver them:
//!
//! ```toml
//! [[step]]
//! action = "toggle"
//! id = "harm-1"
//!
//! [[step]]
//! action = "down"
//! x = 400
//! y = 80
//!
//! [[step]]
//! action = "move"
//! x = 460
//! y = 120
//!
//! [[step]]
//! action = "up"
//! x = 460
//! y = 120
//! ```

use std::{fs, path::Path};

use log::{debug, info, warn};
use serde::Deserialize;

use canopy::{
    CanopyError, Diagram,
    geometry::Point,
    interaction::{PointerButton, PointerEvent, Update},
};

use crate::error::{CliError, Document, TomlError};

/// Pointer button as written in scripts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    #[default]
    Primary,
    Secondary,
}

impl From<Button> for PointerButton {
    fn from(button: Button) -> Self {
        match button {
            Button::Primary => PointerButton::Primary,
            Button::Secondary => PointerButton::Secondary,
        }
    }
}

/// One scripted operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Down {
        x: f32,
        y: f32,
        #[serde(default)]
        button: Button,
    },
    Move {
        x: f32,
        y: f32,
    },
    Up {
        x: f32,
        y: f32,
        #[serde(default)]
        button: Button,
    },
    Wheel {
        delta: f32,
    },
    Toggle {
        id: String,
    },
    Activate {
        id: String,
    },
    ExpandAll,
    CollapseAll,
    ZoomIn,
    ZoomOut,
    ResetView,
    Refresh,
}

impl Step {
    fn pointer_event(&self) -> Option<PointerEvent> {
        let event = match *self {
            Self::Down { x, y, button } => PointerEvent::Down {
                position: Point::new(x, y),
                button: button.into(),
            },
            Self::Move { x, y } => PointerEvent::Move {
                position: Point::new(x, y),
            },
            Self::Up { x, y, button } => PointerEvent::Up {
                position: Point::new(x, y),
                button: button.into(),
            },
            Self::Wheel { delta } => PointerEvent::Wheel { delta },
            _ => return None,
        };
        Some(event)
    }

    /// Applies this step to `diagram`.
    ///
    /// # Errors
    ///
    /// Only [`Step::Refresh`] can fail, when the rebuild does.
    pub fn apply<P: Clone + Default>(
        &self,
        diagram: &mut Diagram<P>,
    ) -> Result<Update, CanopyError> {
        if let Some(event) = self.pointer_event() {
            return Ok(diagram.handle_event(event));
        }

        let changed = match self {
            Self::Toggle { id } => diagram.toggle(id),
            Self::Activate { id } => diagram.activate(id),
            Self::ExpandAll => {
                diagram.expand_all();
                true
            }
            Self::CollapseAll => {
                diagram.collapse_all();
                true
            }
            Self::ZoomIn => {
                diagram.zoom_in();
                true
            }
            Self::ZoomOut => {
                diagram.zoom_out();
                true
            }
            Self::ResetView => {
                diagram.reset_view();
                true
            }
            Self::Refresh => {
                diagram.refresh()?;
                true
            }
            Self::Down { .. } | Self::Move { .. } | Self::Up { .. } | Self::Wheel { .. } => false,
        };

        if !changed {
            warn!(step:? = self; "Step had no effect");
        }
        Ok(if changed { Update::Redraw } else { Update::Unchanged })
    }
}

#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(default, rename = "step")]
    steps: Vec<Step>,
}

/// Parses a script from TOML text. `path` is only used for reporting.
pub fn parse_script(src: &str, path: &Path) -> Result<Vec<Step>, TomlError> {
    let file: ScriptFile =
        toml::from_str(src).map_err(|err| TomlError::new(Document::Script, path, src, &err))?;
    Ok(file.steps)
}

/// Reads and parses a script file.
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<Step>, CliError> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|err| CliError::read(path, err))?;
    Ok(parse_script(&src, path)?)
}

/// Applies `steps` in order and returns how many of them asked for a redraw.
pub fn replay<P: Clone + Default>(
    diagram: &mut Diagram<P>,
    steps: &[Step],
) -> Result<usize, CanopyError> {
    let mut redraws = 0;
    for (index, step) in steps.iter().enumerate() {
        let update = step.apply(diagram)?;
        debug!(index, step:?, update:?; "Replayed step");
        if update.needs_redraw() {
            redraws += 1;
        }
    }

    info!(steps = steps.len(), redraws; "Script replayed");
    Ok(redraws)
}

#[cfg(test)]
mod tests {
    use canopy::{NodeKind, Record, config::AppConfig};

    use super::*;

    fn diagram() -> Diagram<()> {
        let mut diagram = Diagram::new(AppConfig::default()).unwrap();
        diagram
            .build(vec![
                Record::new("s-harm", "Harm", NodeKind::Harm, ())
                    .collapsed()
                    .with_child(Record::new("s-sev", "Severity", NodeKind::Detail, ())),
            ])
            .unwrap();
        diagram
    }

    #[test]
    fn test_parse_all_actions() {
        let src = r#"
            [[step]]
            action = "down"
            x = 10
            y = 20.5
            button = "secondary"

            [[step]]
            action = "move"
            x = 15
            y = 25

            [[step]]
            action = "up"
            x = 15
            y = 25

            [[step]]
            action = "wheel"
            delta = -1

            [[step]]
            action = "toggle"
            id = "harm-1"

            [[step]]
            action = "activate"
            id = "harm-1"

            [[step]]
            action = "expand_all"

            [[step]]
            action = "collapse_all"

            [[step]]
            action = "zoom_in"

            [[step]]
            action = "zoom_out"

            [[step]]
            action = "reset_view"

            [[step]]
            action = "refresh"
        "#;
        let steps = parse_script(src, Path::new("script.toml")).unwrap();
        assert_eq!(steps.len(), 12);
        assert_eq!(
            steps[0],
            Step::Down {
                x: 10.0,
                y: 20.5,
                button: Button::Secondary
            }
        );
        assert_eq!(
            steps[2],
            Step::Up {
                x: 15.0,
                y: 25.0,
                button: Button::Primary
            }
        );
        assert_eq!(steps[3], Step::Wheel { delta: -1.0 });
        assert_eq!(steps[6], Step::ExpandAll);
        assert_eq!(steps[11], Step::Refresh);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let src = "[[step]]\naction = \"teleport\"\n";
        let err = parse_script(src, Path::new("script.toml")).unwrap_err();
        assert_eq!(err.document(), Document::Script);
        assert!(err.message().contains("teleport"));
    }

    #[test]
    fn test_replay_counts_redraws() {
        let mut diagram = diagram();
        let steps = vec![
            Step::Toggle {
                id: "s-harm".to_string(),
            },
            Step::Toggle {
                id: "missing".to_string(),
            },
            Step::ZoomIn,
            Step::Wheel { delta: 0.0 },
        ];

        let redraws = replay(&mut diagram, &steps).unwrap();
        assert_eq!(redraws, 2);
        assert!(diagram.node("s-sev").unwrap().is_visible());
        assert!(diagram.viewport().zoom() > 1.0);
    }

    #[test]
    fn test_refresh_step_rebuilds() {
        let mut diagram = diagram();
        let steps = vec![
            Step::Toggle {
                id: "s-harm".to_string(),
            },
            Step::Refresh,
        ];
        replay(&mut diagram, &steps).unwrap();
        assert!(!diagram.node("s-sev").unwrap().is_visible());
    }
}
