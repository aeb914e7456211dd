// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;

use anyhow::{Context, Result};
use ember_telemetry::ProfilerConfig;
use ember_ui::UiConfig;
use serde::Deserialize;

/// Settings read from `config.ron` next to the sandbox manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Number of scripted frames to run.
    pub frames: u32,
    /// Profiler arena size and initial toggle.
    pub profiler: ProfilerConfig,
    /// Canvas, description file, and input bindings of the UI.
    pub ui: UiConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            frames: 12,
            profiler: ProfilerConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl SandboxConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        ron::de::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}
