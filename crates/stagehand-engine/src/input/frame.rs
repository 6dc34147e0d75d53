use super::types::PlatformEvent;

/// Platform events collected since the previous frame, in arrival order.
#[derive(Debug, Default)]
pub struct InputFrame {
    events: Vec<PlatformEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn push_event(&mut self, ev: PlatformEvent) {
        self.events.push(ev);
    }

    pub fn events(&self) -> &[PlatformEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
