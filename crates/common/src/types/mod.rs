use serde::Serialize;

/// Liveness payload returned by `/health`.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}
