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

//! Aggregation of a retained frame tree into per-tag statistics.

use std::collections::HashMap;
use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

use super::arena::SampleArena;
use super::clock::Clock;
use super::sample::SampleId;

/// The column a report is ranked by, descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportSort {
    /// Time spent in the region itself, children excluded.
    #[default]
    SelfTime,
    /// Full time spent in the region, children included.
    TotalTime,
}

/// Statistics for every sample sharing one tag within a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReportNode {
    /// The shared tag.
    pub tag: &'static str,
    /// How many samples carried the tag.
    pub sample_count: u64,
    /// Draw calls summed over the samples.
    pub draw_calls: u64,
    /// Allocations summed over the samples.
    pub alloc_count: u64,
    /// Allocated bytes summed over the samples.
    pub alloc_bytes: u64,
    /// Sum of sample durations.
    pub total_time_ms: f64,
    /// Sum of the durations of each sample's direct children.
    pub child_time_ms: f64,
    /// `total_time_ms - child_time_ms`.
    pub self_time_ms: f64,
    /// Shortest sample.
    pub min_time_ms: f64,
    /// Longest sample.
    pub max_time_ms: f64,
    /// Duration of the last sample added.
    pub last_time_ms: f64,
    /// Running mean of the sample durations.
    pub average_time_ms: f64,
    /// Share of the frame spent in these samples, in percent.
    pub frame_percentage: f64,
}

impl ProfileReportNode {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            sample_count: 0,
            draw_calls: 0,
            alloc_count: 0,
            alloc_bytes: 0,
            total_time_ms: 0.0,
            child_time_ms: 0.0,
            self_time_ms: 0.0,
            min_time_ms: f64::INFINITY,
            max_time_ms: 0.0,
            last_time_ms: 0.0,
            average_time_ms: 0.0,
            frame_percentage: 0.0,
        }
    }

    fn add_sample(&mut self, occurrence: &Occurrence) {
        let duration = occurrence.duration_ms;
        self.draw_calls += u64::from(occurrence.draw_calls);
        self.alloc_count += occurrence.alloc_count;
        self.alloc_bytes += occurrence.alloc_bytes;
        self.last_time_ms = duration;
        self.min_time_ms = self.min_time_ms.min(duration);
        self.max_time_ms = self.max_time_ms.max(duration);
        self.total_time_ms += duration;
        self.child_time_ms += occurrence.children_ms;
        self.self_time_ms = self.total_time_ms - self.child_time_ms;

        let previous_sum = self.average_time_ms * self.sample_count as f64;
        self.sample_count += 1;
        self.average_time_ms = (previous_sum + duration) / self.sample_count as f64;
    }

    fn sort_key(&self, sort: ReportSort) -> f64 {
        match sort {
            ReportSort::SelfTime => self.self_time_ms,
            ReportSort::TotalTime => self.total_time_ms,
        }
    }
}

struct Occurrence {
    duration_ms: f64,
    children_ms: f64,
    draw_calls: u32,
    alloc_count: u64,
    alloc_bytes: u64,
}

/// A ranked, flattened view of one completed frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    /// Number of the frame the report describes.
    pub frame_number: u64,
    /// Duration of the frame root.
    pub frame_time_ms: f64,
    /// The ranking used for `nodes`.
    pub sort: ReportSort,
    /// One entry per distinct tag, most significant first.
    pub nodes: Vec<ProfileReportNode>,
}

impl ProfileReport {
    /// Walks the tree under `root` and buckets samples by tag.
    ///
    /// Buckets are created in depth-first order; the sort is stable, so tags
    /// with equal keys keep that order.
    pub(crate) fn from_tree<C: Clock>(
        arena: &SampleArena,
        root: SampleId,
        clock: &C,
        frame_number: u64,
        sort: ReportSort,
    ) -> Self {
        let frame_time_ms = arena
            .get(root)
            .map_or(0.0, |s| clock.ticks_to_ms(s.duration_ticks()));

        let mut nodes: Vec<ProfileReportNode> = Vec::new();
        let mut bucket_of: HashMap<&'static str, usize> = HashMap::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            let Some(sample) = arena.get(id) else {
                continue;
            };
            let children: Vec<SampleId> = arena.children(id).collect();
            let children_ms: f64 = children
                .iter()
                .filter_map(|c| arena.get(*c))
                .map(|c| clock.ticks_to_ms(c.duration_ticks()))
                .sum();

            let occurrence = Occurrence {
                duration_ms: clock.ticks_to_ms(sample.duration_ticks()),
                children_ms,
                draw_calls: sample.draw_calls(),
                alloc_count: sample.alloc_count(),
                alloc_bytes: sample.alloc_bytes(),
            };
            let index = *bucket_of.entry(sample.tag()).or_insert_with(|| {
                nodes.push(ProfileReportNode::new(sample.tag()));
                nodes.len() - 1
            });
            nodes[index].add_sample(&occurrence);

            stack.extend(children.into_iter().rev());
        }

        if frame_time_ms > 0.0 {
            for node in &mut nodes {
                node.frame_percentage = node.total_time_ms / frame_time_ms * 100.0;
            }
        }

        nodes.sort_by(|a, b| b.sort_key(sort).total_cmp(&a.sort_key(sort)));

        Self {
            frame_number,
            frame_time_ms,
            sort,
            nodes,
        }
    }

    /// Looks up the bucket for `tag`.
    pub fn node(&self, tag: &str) -> Option<&ProfileReportNode> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    /// Serialises the report for external tooling.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---===Frame impact report===---")?;
        writeln!(
            f,
            "Frame {}'s time: {:>10.2}ms",
            self.frame_number, self.frame_time_ms
        )?;
        writeln!(
            f,
            "{:<25}{:>12}{:>12}{:>12}{:>12}{:>12}{:>12}{:>12}{:>12}{:>11}",
            "TAG",
            "NUM CALLS",
            "NUM DRAWS",
            "NUM ALLOCS",
            "SIZE ALLOCS",
            "SELF TIME",
            "TOTAL TIME",
            "MAX TIME",
            "AVG TIME",
            "PERCENTAGE"
        )?;
        for n in &self.nodes {
            writeln!(
                f,
                "{:<25}{:>12}{:>12}{:>12}{:>12}{:>10.2}ms{:>10.2}ms{:>10.2}ms{:>10.2}ms{:>10.2}%",
                n.tag,
                n.sample_count,
                n.draw_calls,
                n.alloc_count,
                n.alloc_bytes,
                n.self_time_ms,
                n.total_time_ms,
                n.max_time_ms,
                n.average_time_ms,
                n.frame_percentage
            )?;
        }
        write!(f, "---===End of Frame impact report===---")
    }
}

/// Renders the tree under `root` one sample per line, indented with dashes.
pub(crate) fn render_tree_view<C: Clock>(arena: &SampleArena, root: SampleId, clock: &C) -> String {
    let frame_ms = arena
        .get(root)
        .map_or(0.0, |s| clock.ticks_to_ms(s.duration_ticks()));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<30}{:>12}{:>12}{:>12}{:>12}{:>11}",
        "TAG", "NUM DRAWS", "NUM ALLOCS", "SIZE ALLOCS", "TIME", "%FRAME"
    );

    let mut stack = vec![(root, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let Some(sample) = arena.get(id) else {
            continue;
        };
        let ms = clock.ticks_to_ms(sample.duration_ticks());
        let percentage = if frame_ms > 0.0 {
            ms / frame_ms * 100.0
        } else {
            0.0
        };
        let tag = format!("{}{}", "-".repeat(depth), sample.tag());
        let _ = writeln!(
            out,
            "{:<30}{:>12}{:>12}{:>12}{:>10.2}ms{:>10.2}%",
            tag,
            sample.draw_calls(),
            sample.alloc_count(),
            sample.alloc_bytes(),
            ms,
            percentage
        );

        let children: Vec<SampleId> = arena.children(id).collect();
        stack.extend(children.into_iter().rev().map(|c| (c, depth + 1)));
    }
    out
}
