//! Per-view indicator instance manager.
//!
//! Each chart view owns one manager; instances are never shared across
//! views. Creation and updates validate parameter overrides against the
//! catalog schema and report every auto-correction back to the caller.

use crate::catalog::{catalog, ParamValue};
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{
    resolve_parameters, validate_color, ParamAdjustment, ParamOverrides,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A user-configured occurrence of an indicator definition.
///
/// `instance_id` is unique for the process's lifetime and stable across
/// parameter edits; only explicit removal or view teardown destroys the
/// instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorInstance {
    pub instance_id: String,
    pub definition_id: String,
    pub params: BTreeMap<String, ParamValue>,
    pub color: String,
}

/// Outcome of a create or update: the instance snapshot plus the list of
/// auto-corrections applied to out-of-policy overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceChange {
    pub instance: IndicatorInstance,
    pub adjustments: Vec<ParamAdjustment>,
}

/// Default line colors, cycled by creation order.
const DEFAULT_PALETTE: &[&str] = &[
    "#7ee0ff", "#ff8ba7", "#4ade80", "#fbbf24", "#c084fc", "#60a5fa", "#f472b6", "#22d3ee",
];

/// Manages the indicator instances of a single chart view.
#[derive(Debug, Default)]
pub struct InstanceManager {
    instances: Vec<IndicatorInstance>,
    next_seq: u64,
}

impl InstanceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an instance of `definition_id` with validated overrides.
    ///
    /// Numeric overrides are clamped and step-snapped per the schema;
    /// unknown keys are rejected. The new instance gets a fresh id and the
    /// next palette color.
    pub fn create_instance(
        &mut self,
        definition_id: &str,
        overrides: &ParamOverrides,
    ) -> Result<InstanceChange, IndicatorError> {
        let definition = catalog().get(definition_id)?;
        let (params, adjustments) = resolve_parameters(definition, overrides)?;
        self.log_adjustments(definition_id, &adjustments);

        let instance_id = self.next_instance_id();
        // Palette index follows the creation counter; a removal must not
        // shift later assignments onto an in-use color.
        let color =
            DEFAULT_PALETTE[(self.next_seq as usize - 1) % DEFAULT_PALETTE.len()].to_string();
        let instance = IndicatorInstance {
            instance_id,
            definition_id: definition_id.to_string(),
            params,
            color,
        };
        info!(
            instance_id = %instance.instance_id,
            definition_id,
            "indicator instance created"
        );
        self.instances.push(instance.clone());
        Ok(InstanceChange {
            instance,
            adjustments,
        })
    }

    /// Re-validate `overrides` and replace the instance's parameter map in
    /// place. Identity and insertion position are unchanged.
    pub fn update_instance(
        &mut self,
        instance_id: &str,
        overrides: &ParamOverrides,
    ) -> Result<InstanceChange, IndicatorError> {
        let position = self
            .instances
            .iter()
            .position(|i| i.instance_id == instance_id)
            .ok_or_else(|| IndicatorError::UnknownInstance(instance_id.to_string()))?;

        let definition_id = self.instances[position].definition_id.clone();
        let definition = catalog().get(&definition_id)?;
        let (params, adjustments) = resolve_parameters(definition, overrides)?;
        self.log_adjustments(&definition_id, &adjustments);

        let instance = &mut self.instances[position];
        instance.params = params;
        info!(instance_id, "indicator instance updated");
        Ok(InstanceChange {
            instance: instance.clone(),
            adjustments,
        })
    }

    /// Change an instance's display color.
    pub fn set_color(&mut self, instance_id: &str, color: &str) -> Result<(), IndicatorError> {
        validate_color("color", color)?;
        let instance = self
            .instances
            .iter_mut()
            .find(|i| i.instance_id == instance_id)
            .ok_or_else(|| IndicatorError::UnknownInstance(instance_id.to_string()))?;
        instance.color = color.to_string();
        Ok(())
    }

    /// Remove an instance. Idempotent: removing an absent id is a no-op.
    pub fn remove_instance(&mut self, instance_id: &str) {
        let before = self.instances.len();
        self.instances.retain(|i| i.instance_id != instance_id);
        if self.instances.len() < before {
            info!(instance_id, "indicator instance removed");
        } else {
            debug!(instance_id, "remove for absent instance ignored");
        }
    }

    /// Current instances in insertion order.
    pub fn instances(&self) -> &[IndicatorInstance] {
        &self.instances
    }

    pub fn get(&self, instance_id: &str) -> Option<&IndicatorInstance> {
        self.instances.iter().find(|i| i.instance_id == instance_id)
    }

    /// Monotonic counter plus random suffix; ids are never reused, even
    /// after removal.
    fn next_instance_id(&mut self) -> String {
        self.next_seq += 1;
        let suffix = Uuid::new_v4().simple().to_string();
        format!("ind-{}-{}", self.next_seq, &suffix[..8])
    }

    fn log_adjustments(&self, definition_id: &str, adjustments: &[ParamAdjustment]) {
        for adj in adjustments {
            warn!(
                definition_id,
                key = %adj.key,
                from = adj.from,
                to = adj.to,
                "parameter override auto-corrected"
            );
        }
    }
}
