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

// Ember sandbox
// Runs scripted frames headlessly and prints the profiler output.

mod config;
mod script;

use std::path::Path;

use anyhow::Result;
use ember_core::input::InputState;
use ember_core::memory;
use ember_core::renderer::{PathTextureProvider, RecordingRenderer};
use ember_core::EventBus;
use ember_telemetry::{LogSection, ProfilingSystem, ReportSort, TrackingAllocator};
use ember_ui::{UiEvent, UiSystem};

use crate::config::SandboxConfig;

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator::new(std::alloc::System);

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let (mut config, load_error) = match SandboxConfig::load(&root.join("config.ron")) {
        Ok(config) => (config, None),
        Err(e) => (SandboxConfig::default(), Some(e)),
    };
    Builder::from_env(Env::default().default_filter_or(config.log_filter.as_str())).init();
    if let Some(e) = load_error {
        log::warn!("Using the default sandbox config: {e:#}");
    }
    if config.ui.description_path.is_relative() {
        config.ui.description_path = root.join(&config.ui.description_path);
    }

    let bus = EventBus::<UiEvent>::new();
    let mut ui = UiSystem::new(
        config.ui.clone(),
        bus.sender(),
        Box::new(PathTextureProvider::new()),
    );
    {
        let _section = LogSection::new("initial UI load");
        ui.reload()?;
    }
    ui.set_widget_enabled("Quit", false);

    let mut profiler = ProfilingSystem::new(&config.profiler);
    let mut renderer = RecordingRenderer::new();
    let mut input = InputState::new();

    profiler.start_new_frame()?;
    for frame in 0..config.frames {
        input.apply_all(&script::events_for(frame, &ui));

        profiler.scope("update", |_| ui.update(&input))?;
        profiler.scope("render", |p| {
            renderer.clear();
            let draws = ui.render(&mut renderer);
            p.add_draw_calls(draws);
        })?;
        profiler.scope("events", |_| {
            for event in bus.drain() {
                log::info!(
                    "Frame {frame}: '{}' from widget '{}'{}",
                    event.name,
                    event.widget_name().unwrap_or_default(),
                    event
                        .checked()
                        .map(|c| format!(", checked = {c}"))
                        .unwrap_or_default()
                );
            }
        })?;

        input.advance_frame();
        profiler.mark_frame()?;
    }

    profiler.log_report(ReportSort::SelfTime);
    if let Some(tree) = profiler.tree_view() {
        println!("{tree}");
    }
    if let Some(report) = profiler.generate_report(ReportSort::TotalTime) {
        println!("{report}");
    }
    println!(
        "Average frame: {:.3} ms | heap now: {} B | heap peak: {} B",
        profiler.average_frame_ms(),
        memory::get_currently_allocated_bytes(),
        memory::get_peak_allocated_bytes()
    );
    Ok(())
}
