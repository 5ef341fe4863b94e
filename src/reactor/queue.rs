use super::event::Event;
use std::collections::VecDeque;

/// Priority event queue with 4 priority levels, FIFO within a level
pub struct EventQueue {
	queues: [VecDeque<Event>; 4],
}

impl EventQueue {
	pub fn new() -> Self {
		Self {
			queues: Default::default(),
		}
	}

	/// Push an event to the appropriate priority queue
	pub fn push(&mut self, event: Event) {
		let priority = event.priority();
		self.queues[priority.as_index()].push_back(event);
	}

	/// Pop the highest priority event available
	pub fn pop(&mut self) -> Option<Event> {
		self.queues.iter_mut().find_map(|queue| queue.pop_front())
	}

	pub fn len(&self) -> usize {
		self.queues.iter().map(|q| q.len()).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.queues.iter().all(|q| q.is_empty())
	}
}

impl Default for EventQueue {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactor::event::{ExerciseEvent, SoundEvent, ViewEvent};
	use crate::types::ClockId;
	use std::time::Instant;

	#[test]
	fn pops_by_priority_then_fifo() {
		let mut queue = EventQueue::new();
		queue.push(Event::Sound(SoundEvent::SetDevice { name: None }));
		queue.push(Event::Exercise(ExerciseEvent::Start));
		queue.push(Event::Exercise(ExerciseEvent::Tick {
			clock: ClockId(1),
			due: Instant::now(),
		}));
		queue.push(Event::Exercise(ExerciseEvent::Restart));
		queue.push(Event::View(ViewEvent::Notice {
			message: "hi".into(),
		}));
		assert_eq!(queue.len(), 5);

		assert!(matches!(queue.pop(), Some(Event::View(_))));
		assert!(matches!(
			queue.pop(),
			Some(Event::Exercise(ExerciseEvent::Tick { .. }))
		));
		assert!(matches!(
			queue.pop(),
			Some(Event::Exercise(ExerciseEvent::Start))
		));
		assert!(matches!(
			queue.pop(),
			Some(Event::Exercise(ExerciseEvent::Restart))
		));
		assert!(matches!(queue.pop(), Some(Event::Sound(_))));
		assert!(queue.pop().is_none());
		assert!(queue.is_empty());
	}
}
