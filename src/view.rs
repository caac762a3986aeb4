//! Per-chart-view facade tying an instance manager to a price series.
//!
//! Recomputation triggers (new bar, streaming tick, instance create or
//! update) all funnel through [`ChartView::render_frames`], which serves
//! unchanged instances from a memo cache keyed by series version and
//! parameter hash. A full recompute on miss is the correctness baseline;
//! the cache only bounds per-tick cost.

use crate::catalog::{catalog, ParamValue};
use crate::indicators::validation::ParamOverrides;
use crate::indicators::{compute, IndicatorError};
use crate::instances::{InstanceChange, InstanceManager};
use crate::models::{ComputedSeries, PriceSeries};
use crate::render::{to_renderable, Renderable};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// What the rendering collaborator receives per active instance.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub computed: ComputedSeries,
    pub renderable: Renderable,
}

struct CacheEntry {
    series_version: u64,
    param_hash: u64,
    computed: ComputedSeries,
}

/// One chart view: an instance manager plus a per-instance memo cache.
#[derive(Default)]
pub struct ChartView {
    manager: InstanceManager,
    cache: HashMap<String, CacheEntry>,
}

impl ChartView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manager(&self) -> &InstanceManager {
        &self.manager
    }

    /// Add an indicator to this view. See [`InstanceManager::create_instance`].
    pub fn add_indicator(
        &mut self,
        definition_id: &str,
        overrides: &ParamOverrides,
    ) -> Result<InstanceChange, IndicatorError> {
        self.manager.create_instance(definition_id, overrides)
    }

    /// Edit an instance's parameters. See [`InstanceManager::update_instance`].
    pub fn update_indicator(
        &mut self,
        instance_id: &str,
        overrides: &ParamOverrides,
    ) -> Result<InstanceChange, IndicatorError> {
        self.manager.update_instance(instance_id, overrides)
    }

    pub fn set_indicator_color(
        &mut self,
        instance_id: &str,
        color: &str,
    ) -> Result<(), IndicatorError> {
        self.manager.set_color(instance_id, color)
    }

    /// Remove an indicator from this view; idempotent.
    pub fn remove_indicator(&mut self, instance_id: &str) {
        self.manager.remove_instance(instance_id);
        self.cache.remove(instance_id);
    }

    /// Compute (or reuse) every active instance and package results for the
    /// rendering collaborator, in insertion order.
    pub fn render_frames(
        &mut self,
        series: &PriceSeries,
    ) -> Result<Vec<RenderFrame>, IndicatorError> {
        let mut frames = Vec::with_capacity(self.manager.instances().len());

        for instance in self.manager.instances() {
            let param_hash = param_hash(&instance.params);
            let cached = self.cache.get(&instance.instance_id).filter(|entry| {
                entry.series_version == series.version() && entry.param_hash == param_hash
            });

            let computed = match cached {
                Some(entry) => entry.computed.clone(),
                None => {
                    debug!(
                        instance_id = %instance.instance_id,
                        series_version = series.version(),
                        "recomputing indicator"
                    );
                    let computed = compute(instance, series)?;
                    self.cache.insert(
                        instance.instance_id.clone(),
                        CacheEntry {
                            series_version: series.version(),
                            param_hash,
                            computed: computed.clone(),
                        },
                    );
                    computed
                }
            };

            let definition = catalog().get(&instance.definition_id)?;
            let renderable = to_renderable(&computed, instance, definition);
            frames.push(RenderFrame {
                computed,
                renderable,
            });
        }

        Ok(frames)
    }
}

/// Stable digest of a parameter map; BTreeMap iteration order keeps it
/// deterministic.
fn param_hash(params: &std::collections::BTreeMap<String, ParamValue>) -> u64 {
    let mut hasher = DefaultHasher::new();
    for (key, value) in params {
        key.hash(&mut hasher);
        match value {
            ParamValue::Number(v) => {
                0u8.hash(&mut hasher);
                v.to_bits().hash(&mut hasher);
            }
            ParamValue::Color(c) => {
                1u8.hash(&mut hasher);
                c.hash(&mut hasher);
            }
            ParamValue::Select(s) => {
                2u8.hash(&mut hasher);
                s.hash(&mut hasher);
            }
        }
    }
    hasher.finish()
}
