use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::time::{MissedTickBehavior, interval};

#[derive(Debug)]
pub enum AppEvent {
    TickFrame,
    Input(Event),
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

#[must_use]
pub fn frame_period(fps: u8) -> Duration {
    Duration::from_millis(1000_u64 / u64::from(fps.max(1)))
}

pub fn start_frame_task(tx: tokio::sync::mpsc::Sender<AppEvent>, fps: u8) {
    tokio::spawn(async move {
        let mut ticker = interval(frame_period(fps));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickFrame).await.is_err() {
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_period_matches_fps() {
        assert_eq!(frame_period(20), Duration::from_millis(50));
        assert_eq!(frame_period(60), Duration::from_millis(16));
        assert_eq!(frame_period(0), Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn frame_task_emits_ticks() {
        let (tx, mut rx) = tokio::sync::mpsc::channel(4);
        start_frame_task(tx, 60);
        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("tick before timeout");
        assert!(matches!(event, Some(AppEvent::TickFrame)));
    }
}
