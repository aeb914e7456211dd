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

use std::path::PathBuf;

use crate::widget::WidgetId;

/// Failures of the UI layer.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// The description file could not be read.
    #[error("failed to read UI description '{path}': {source}")]
    Io {
        /// The file that was read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The description is not well-formed XML.
    #[error("malformed UI description: {0}")]
    Xml(#[from] roxmltree::Error),
    /// A description node names no known widget.
    #[error("unknown widget tag '{tag}' at {position}")]
    UnknownWidgetTag {
        /// The offending tag.
        tag: String,
        /// Row and column in the description.
        position: String,
    },
    /// An attribute value could not be coerced to its property type.
    #[error("attribute '{attribute}' of <{tag}> has malformed value '{value}': {reason}")]
    MalformedAttribute {
        /// Tag of the node carrying the attribute.
        tag: String,
        /// The attribute name.
        attribute: String,
        /// The raw value.
        value: String,
        /// Why coercion failed.
        reason: String,
    },
    /// The handle does not refer to a live widget.
    #[error("no widget for handle {0:?}")]
    UnknownWidget(WidgetId),
}
