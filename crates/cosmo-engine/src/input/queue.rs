/// Input the host forwards to the scene, once per browser event.
///
/// Pointer coordinates are CSS pixels from the canvas' top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// Wheel or trackpad scroll. Positive `delta` zooms out.
    Wheel { delta: f32 },
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// Button, slider or toggle in the host UI. The game defines `kind`
    /// and what `a`, `b`, `c` mean.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
    /// Free text from the host UI, e.g. a search box submit.
    Text { kind: u32, text: String },
}

/// Events collected between two ticks. The host pushes; the runner drains
/// after the game has seen them.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self { events: Vec::with_capacity(32) }
    }

    /// Queue an event. A move directly after another move replaces it:
    /// only the latest pointer position matters within one frame.
    pub fn push(&mut self, event: InputEvent) {
        if let (InputEvent::PointerMove { .. }, Some(InputEvent::PointerMove { .. })) =
            (&event, self.events.last())
        {
            self.events.pop();
        }
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_queue() {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown { key_code: 32 });
        q.push(InputEvent::Custom { kind: 1, a: 2.0, b: 0.0, c: 0.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events[1], InputEvent::Custom { kind: 1, a: 2.0, b: 0.0, c: 0.0 });
        assert!(q.is_empty());
    }

    #[test]
    fn consecutive_moves_collapse_to_the_latest() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        q.push(InputEvent::PointerMove { x: 3.0, y: 0.0 });
        q.push(InputEvent::PointerMove { x: 9.0, y: 1.0 });
        q.push(InputEvent::PointerUp { x: 9.0, y: 1.0 });
        q.push(InputEvent::PointerMove { x: 12.0, y: 1.0 });
        let events = q.drain();
        assert_eq!(
            events,
            vec![
                InputEvent::PointerDown { x: 0.0, y: 0.0 },
                InputEvent::PointerMove { x: 9.0, y: 1.0 },
                InputEvent::PointerUp { x: 9.0, y: 1.0 },
                InputEvent::PointerMove { x: 12.0, y: 1.0 },
            ]
        );
    }

    #[test]
    fn wheel_and_text_keep_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Wheel { delta: 120.0 });
        q.push(InputEvent::Text { kind: 1, text: "earth".to_string() });
        let kinds: Vec<_> = q.iter().map(|e| matches!(e, InputEvent::Text { .. })).collect();
        assert_eq!(kinds, vec![false, true]);
    }
}
