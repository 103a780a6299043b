use async_graphql::{Context, ErrorExtensions, Result, Subscription};
use futures_util::Stream;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};

use crate::auth::permissions::require_admin;
use crate::gql::domains::seating::service::validate_table;
use crate::gql::domains::seating::types::SeatingChangeEvent;

const CHANNEL_CAPACITY: usize = 100;

/// All subscription channels
struct SubscriptionChannels {
    /// Every seating change
    seating: broadcast::Sender<SeatingChangeEvent>,
    /// Per-table seating channels
    tables: HashMap<i32, broadcast::Sender<SeatingChangeEvent>>,
}

impl SubscriptionChannels {
    fn new() -> Self {
        Self {
            seating: broadcast::channel(CHANNEL_CAPACITY).0,
            tables: HashMap::new(),
        }
    }

    fn get_or_create_table(&mut self, table_number: i32) -> &broadcast::Sender<SeatingChangeEvent> {
        self.tables
            .entry(table_number)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
    }
}

static CHANNELS: Lazy<Arc<Mutex<SubscriptionChannels>>> =
    Lazy::new(|| Arc::new(Mutex::new(SubscriptionChannels::new())));

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Seating changes for every table, or only `tableNumber` (admin only).
    /// Slow subscribers skip events they fell behind on.
    async fn seating_changes(
        &self,
        ctx: &Context<'_>,
        table_number: Option<i32>,
    ) -> Result<impl Stream<Item = Result<SeatingChangeEvent, BroadcastStreamRecvError>>> {
        require_admin(ctx)?;
        validate_table(table_number).map_err(|e| e.extend())?;

        let receiver = {
            let mut channels = CHANNELS.lock();
            match table_number {
                Some(number) => channels.get_or_create_table(number).subscribe(),
                None => channels.seating.subscribe(),
            }
        };

        Ok(BroadcastStream::new(receiver))
    }
}

/// Publish a seating event to the global channel and to the channel of every
/// table it touches
pub fn publish_seating_event(event: SeatingChangeEvent) {
    let mut channels = CHANNELS.lock();
    let touched = event
        .table_number
        .into_iter()
        .chain(event.previous_tables.iter().copied());
    for number in touched {
        let table_sender = channels.get_or_create_table(number);
        let _ = table_sender.send(event.clone());
    }
    let _ = channels.seating.send(event);
}

/// Subscribe to every seating event published in this process.
pub fn subscribe_seating_events() -> broadcast::Receiver<SeatingChangeEvent> {
    CHANNELS.lock().seating.subscribe()
}
