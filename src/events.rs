// 8.0: every hedge transition and rebalance produces an event. used for audit
// trails and for reconstructing a run tick by tick. the EventPayload enum
// lists all event types.

use crate::types::{Price, Quote, Side, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, timestamp: Timestamp, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    // Hedge events
    HedgeOpened(HedgeOpenedEvent),
    HedgeStopped(HedgeStoppedEvent),
    HedgeForcedClosed(HedgeForcedClosedEvent),

    // Range events
    RangeRebalanced(RangeRebalancedEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HedgeOpenedEvent {
    pub side: Side,
    pub entry_price: Price,
    pub tick: Decimal,
    pub stop_tick: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HedgeStoppedEvent {
    pub side: Side,
    pub entry_price: Price,
    pub exit_price: Price,
    pub tick: Decimal,
    pub pnl: Quote,
    pub whipsaw: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HedgeForcedClosedEvent {
    pub side: Side,
    pub entry_price: Price,
    pub exit_price: Price,
    pub pnl: Quote,
    pub successful: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeRebalancedEvent {
    pub exit_price: Price,
    pub old_lower: Price,
    pub old_upper: Price,
    pub new_lower: Price,
    pub new_upper: Price,
    pub duration_days: Decimal,
    pub fees_accrued: Quote,
    pub impermanent_loss: Quote,
}

pub trait EventEmitter {
    fn emit(&mut self, event: Event);
}

#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<Event>,
    next_id: u64,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn next_id(&mut self) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl EventEmitter for EventCollector {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn event_collector() {
        let mut collector = EventCollector::new();

        let event = Event::new(
            collector.next_id(),
            Timestamp::from_millis(1000),
            EventPayload::HedgeOpened(HedgeOpenedEvent {
                side: Side::Short,
                entry_price: Price::new_unchecked(dec!(99.7)),
                tick: dec!(30),
                stop_tick: dec!(45),
            }),
        );

        collector.emit(event);
        assert_eq!(collector.events().len(), 1);

        collector.clear();
        assert!(collector.events().is_empty());
    }

    #[test]
    fn event_ids_increment() {
        let mut collector = EventCollector::new();

        let first = collector.next_id();
        let second = collector.next_id();

        assert_eq!(first, EventId(1));
        assert_eq!(second, EventId(2));
    }

    #[test]
    fn stop_event_creation() {
        let stop = HedgeStoppedEvent {
            side: Side::Short,
            entry_price: Price::new_unchecked(dec!(99.7)),
            exit_price: Price::new_unchecked(dec!(100.1)),
            tick: dec!(60),
            pnl: Quote::new(dec!(-8.02)),
            whipsaw: true,
        };

        assert!(stop.whipsaw);
        assert!(stop.pnl.is_negative());
    }
}
