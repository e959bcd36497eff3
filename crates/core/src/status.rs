//! Lifecycle status vocabularies and transition legality.
//!
//! Statuses are stored as Spanish TEXT values and constrained by CHECK
//! constraints in the schema. The
//! transition table is deliberately permissive: any status may move to any
//! *different* status. Terminality of COMPLETADO / CANCELADO is enforced
//! solely by the same-status rule -- re-applying the current status is
//! rejected as [`CoreError::InvalidTransition`], never treated as an
//! idempotent no-op.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! define_text_status {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $text:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// The TEXT value stored in the database.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }

            /// Parse the stored TEXT value. Unknown values are a
            /// [`CoreError::Validation`] error.
            pub fn parse(s: &str) -> Result<Self, CoreError> {
                match s {
                    $( $text => Ok(Self::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        stringify!($name),
                        [$($text),+].join(", ")
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_text_status! {
    /// Project lifecycle status.
    ProjectStatus {
        Pendiente = "PENDIENTE",
        EnProgreso = "EN_PROGRESO",
        Completado = "COMPLETADO",
        Cancelado = "CANCELADO",
    }
}

define_text_status! {
    /// Task lifecycle status.
    TaskStatus {
        Pendiente = "PENDIENTE",
        EnProgreso = "EN_PROGRESO",
        Completada = "COMPLETADA",
        Cancelada = "CANCELADA",
    }
}

define_text_status! {
    /// Task priority.
    TaskPriority {
        Baja = "BAJA",
        Media = "MEDIA",
        Alta = "ALTA",
    }
}

/// Check that a project status transition is legal.
pub fn ensure_project_transition(
    current: ProjectStatus,
    target: ProjectStatus,
) -> Result<(), CoreError> {
    if current == target {
        return Err(CoreError::InvalidTransition {
            entity: "Project",
            from: current.as_str().to_string(),
            to: target.as_str().to_string(),
        });
    }
    Ok(())
}

/// Check that a task status transition is legal.
pub fn ensure_task_transition(current: TaskStatus, target: TaskStatus) -> Result<(), CoreError> {
    if current == target {
        return Err(CoreError::InvalidTransition {
            entity: "Task",
            from: current.as_str().to_string(),
            to: target.as_str().to_string(),
        });
    }
    Ok(())
}
