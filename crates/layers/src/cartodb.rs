use std::collections::BTreeMap;

use foundation::time::Time;
use serde::{Deserialize, Serialize};

use crate::layer::{Layer, LayerKind};

/// Opacity an active CartoDB layer is drawn with.
pub const ACTIVE_OPACITY: f32 = 0.99;

/// Remote SQL-backed tile layer served by a CartoDB tiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartoDbOptions {
    pub query: Option<String>,
    pub opacity: f32,
    pub active: bool,
    pub auto_bound: bool,
    pub interactivity: Option<String>,
    pub debug: bool,
    pub tiler_domain: String,
    pub tiler_port: String,
    pub tiler_protocol: String,
    pub sql_domain: String,
    pub sql_port: String,
    pub sql_protocol: String,
    pub extra_params: BTreeMap<String, serde_json::Value>,
    pub cdn_url: Option<String>,
}

impl Default for CartoDbOptions {
    fn default() -> Self {
        Self {
            query: None,
            opacity: ACTIVE_OPACITY,
            active: true,
            auto_bound: false,
            interactivity: None,
            debug: false,
            tiler_domain: "cartodb.com".to_string(),
            tiler_port: "80".to_string(),
            tiler_protocol: "http".to_string(),
            sql_domain: "cartodb.com".to_string(),
            sql_port: "80".to_string(),
            sql_protocol: "http".to_string(),
            extra_params: BTreeMap::new(),
            cdn_url: None,
        }
    }
}

// Toggling only applies to CartoDB layers; the other kinds report `false`.
impl Layer {
    pub fn cartodb_options(&self) -> Option<&CartoDbOptions> {
        match &self.kind {
            LayerKind::CartoDb(opts) => Some(opts),
            _ => None,
        }
    }

    fn cartodb_options_mut(&mut self) -> Option<&mut CartoDbOptions> {
        match &mut self.kind {
            LayerKind::CartoDb(opts) => Some(opts),
            _ => None,
        }
    }

    pub fn activate(&mut self) -> bool {
        let Some(opts) = self.cartodb_options_mut() else {
            return false;
        };
        opts.active = true;
        opts.opacity = ACTIVE_OPACITY;
        self.visible = true;
        true
    }

    pub fn deactivate(&mut self) -> bool {
        let Some(opts) = self.cartodb_options_mut() else {
            return false;
        };
        opts.active = false;
        opts.opacity = 0.0;
        self.visible = false;
        true
    }

    pub fn toggle(&mut self) -> bool {
        let active = match self.cartodb_options() {
            Some(opts) => opts.active,
            None => return false,
        };
        if active {
            self.deactivate()
        } else {
            self.activate()
        }
    }

    /// Forces tile refetch by stamping a cache buster into the extra params.
    pub fn invalidate(&mut self, now: Time) -> bool {
        let Some(opts) = self.cartodb_options_mut() else {
            return false;
        };
        opts.extra_params
            .insert("cache_buster".to_string(), now.as_millis().into());
        true
    }
}
