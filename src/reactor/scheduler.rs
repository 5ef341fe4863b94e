use super::event::Event;
use super::queue::EventQueue;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::collections::binary_heap::PeekMut;
use std::time::{Duration, Instant};

struct ScheduledEvent {
	emit_at: Instant,
	seq: u64,
	event: Event,
}

impl PartialEq for ScheduledEvent {
	fn eq(&self, other: &Self) -> bool {
		self.emit_at == other.emit_at && self.seq == other.seq
	}
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

// Min-heap on (emit_at, seq)
impl Ord for ScheduledEvent {
	fn cmp(&self, other: &Self) -> Ordering {
		other
			.emit_at
			.cmp(&self.emit_at)
			.then_with(|| other.seq.cmp(&self.seq))
	}
}

pub struct Scheduler {
	pending: BinaryHeap<ScheduledEvent>,
	next_seq: u64,
}

impl Scheduler {
	pub fn new() -> Self {
		Self {
			pending: BinaryHeap::new(),
			next_seq: 0,
		}
	}

	/// Schedule an event to fire after `delay`
	pub fn schedule(&mut self, event: Event, delay: Duration) {
		self.schedule_at(event, Instant::now() + delay);
	}

	pub fn schedule_at(&mut self, event: Event, emit_at: Instant) {
		self.next_seq += 1;
		self.pending.push(ScheduledEvent {
			emit_at,
			seq: self.next_seq,
			event,
		});
	}

	/// Drain events that are due into the queue
	pub fn tick(&mut self, queue: &mut EventQueue) {
		self.tick_at(Instant::now(), queue);
	}

	pub fn tick_at(&mut self, now: Instant, queue: &mut EventQueue) {
		while let Some(top) = self.pending.peek_mut() {
			if top.emit_at > now {
				break;
			}
			queue.push(PeekMut::pop(top).event);
		}
	}

	/// When the earliest pending event is due, so the UI can wake up for it
	pub fn next_deadline(&self) -> Option<Instant> {
		self.pending.peek().map(|s| s.emit_at)
	}

	pub fn len(&self) -> usize {
		self.pending.len()
	}
}

impl Default for Scheduler {
	fn default() -> Self {
		Self::new()
	}
}
