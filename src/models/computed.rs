//! Computed indicator output aligned with the input price series.

use serde::{Deserialize, Serialize};

/// One named output line of an indicator.
///
/// `values` is index-aligned with the input series; positions lacking
/// sufficient history hold `None` rather than zero, so the renderer draws a
/// gap instead of a spurious flat line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl SubSeries {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Index of the first defined value, if any.
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }
}

/// Full computation result for one indicator instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedSeries {
    pub instance_id: String,
    pub outputs: Vec<SubSeries>,
}

impl ComputedSeries {
    pub fn new(instance_id: impl Into<String>, outputs: Vec<SubSeries>) -> Self {
        Self {
            instance_id: instance_id.into(),
            outputs,
        }
    }

    pub fn output(&self, name: &str) -> Option<&SubSeries> {
        self.outputs.iter().find(|o| o.name == name)
    }
}
