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

/// A typed, thread-safe event channel.
///
/// Producers hold a cloned [`flume::Sender`] obtained from [`EventBus::sender`];
/// the owner of the bus drains pending events once per frame with
/// [`EventBus::drain`]. Events are delivered in publish order.
#[derive(Debug)]
pub struct EventBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// Creates a new bus backed by an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::debug!(
            "EventBus<{}> initialized.",
            std::any::type_name::<T>()
        );
        Self { sender, receiver }
    }

    /// Publishes an event, logging an error if the channel is disconnected.
    pub fn publish(&self, event: T) {
        log::trace!("Publishing an event.");
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to publish event: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a clone of the sending end, for systems that publish into this bus.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns the receiving end. Intended for the owner of the bus.
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }

    /// Takes every pending event without blocking, oldest first.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    /// Number of events waiting to be drained.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
