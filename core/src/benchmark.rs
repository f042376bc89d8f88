//! Firm-versus-benchmark comparison over the four quality areas.

use crate::error::{LabError, LabResult};
use serde::{Deserialize, Serialize};

pub const SCORE_MAX: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityArea {
    Output,
    Process,
    Audience,
    Success,
}

impl QualityArea {
    pub const ALL: [QualityArea; 4] = [Self::Output, Self::Process, Self::Audience, Self::Success];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Output => "Output",
            Self::Process => "Process",
            Self::Audience => "Audience",
            Self::Success => "Success",
        }
    }
}

/// Scores 0–100 per quality area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScores {
    pub output:   i64,
    pub process:  i64,
    pub audience: i64,
    pub success:  i64,
}

impl QualityScores {
    pub fn new(output: i64, process: i64, audience: i64, success: i64) -> LabResult<Self> {
        Self { output, process, audience, success }.checked()
    }

    pub fn get(&self, area: QualityArea) -> i64 {
        match area {
            QualityArea::Output => self.output,
            QualityArea::Process => self.process,
            QualityArea::Audience => self.audience,
            QualityArea::Success => self.success,
        }
    }

    pub fn checked(self) -> LabResult<Self> {
        for area in QualityArea::ALL {
            let value = self.get(area);
            if !(0..=SCORE_MAX).contains(&value) {
                return Err(LabError::OutOfRange {
                    field: area.as_str(),
                    min: 0,
                    max: SCORE_MAX,
                    value,
                });
            }
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaComparison {
    pub area:      QualityArea,
    pub firm:      i64,
    pub benchmark: i64,
    /// firm − benchmark; positive means the firm leads.
    pub gap:       i64,
}

/// One entry per area, in Output/Process/Audience/Success order.
pub fn compare(firm: &QualityScores, benchmark: &QualityScores) -> Vec<AreaComparison> {
    QualityArea::ALL
        .iter()
        .map(|&area| {
            let (f, b) = (firm.get(area), benchmark.get(area));
            AreaComparison {
                area,
                firm: f,
                benchmark: b,
                gap: f - b,
            }
        })
        .collect()
}
