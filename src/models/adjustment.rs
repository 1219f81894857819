use serde::{Deserialize, Serialize};

use super::profile::Equipment;

/// Structured personalization directive derived from free-text notes.
/// Signals are ordered by vocabulary position, so identical notes always
/// produce the identical signal list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentSignal {
    pub kind: SignalKind,
    /// Human-readable explanation of why this signal fired.
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SignalKind {
    /// Exclude exercises requiring this equipment.
    EquipmentAvoid(Equipment),
    /// Exclude meals carrying this tag (soft constraint).
    CuisineAvoid(String),
    /// Scale back session volume or intensity.
    IntensityHint(IntensityHint),
    /// Exclude exercises stressing this body area.
    InjuryNote(BodyArea),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityHint {
    ShorterSessions,
    Easier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyArea {
    Knee,
    Shoulder,
    LowerBack,
    Wrist,
    Ankle,
}
