//! Property-based tests for the playback session
//!
//! Uses proptest to verify queue navigation and handle ownership across
//! random operation sequences.

mod common;

use common::{eventually, FakeEngine};
use encore_core::{ResourceLocator, Track};
use encore_playback::{MediaStatus, PlaybackSession, Queue};
use proptest::prelude::*;
use std::sync::Arc;

// ===== Helpers =====

#[derive(Debug, Clone)]
enum Op {
    Next,
    Prev,
    Toggle,
    PlayQueued(usize),
    /// Engine reports the live track finished
    Finish,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Next),
        3 => Just(Op::Prev),
        2 => Just(Op::Toggle),
        1 => (0usize..64).prop_map(Op::PlayQueued),
        2 => Just(Op::Finish),
    ]
}

fn make_tracks(len: usize) -> Vec<Arc<Track>> {
    (0..len)
        .map(|i| {
            Arc::new(Track::new(
                format!("t{i}"),
                format!("Track {i}"),
                ResourceLocator::new(format!("t{i}.mp3")),
            ))
        })
        .collect()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

// ===== Property Tests =====

proptest! {
    /// Property: n steps forward from s lands on (s + n) mod len
    #[test]
    fn play_next_is_cyclic(len in 1usize..20, start_seed in 0usize..20, steps in 0usize..50) {
        let start = start_seed % len;
        let rt = runtime();

        let (index, live, max_live) = rt.block_on(async {
            let engine = FakeEngine::new();
            let session = PlaybackSession::new(engine.clone());
            session.set_queue_and_play(make_tracks(len), start).await.unwrap();

            for _ in 0..steps {
                session.play_next().await;
            }
            (session.current_index(), engine.live_count(), engine.max_live())
        });

        prop_assert_eq!(index, Some((start + steps) % len));
        prop_assert_eq!(live, 1);
        prop_assert_eq!(max_live, 1);
    }

    /// Property: n steps back from s lands on (s - n) mod len
    #[test]
    fn play_prev_is_cyclic(len in 1usize..20, start_seed in 0usize..20, steps in 0usize..50) {
        let start = start_seed % len;
        let rt = runtime();

        let index = rt.block_on(async {
            let engine = FakeEngine::new();
            let session = PlaybackSession::new(engine);
            session.set_queue_and_play(make_tracks(len), start).await.unwrap();

            for _ in 0..steps {
                session.play_prev().await;
            }
            session.current_index()
        });

        let expected = (start + len * steps - steps) % len;
        prop_assert_eq!(index, Some(expected));
    }

    /// Property: random transport sequences, with finished tracks mixed in,
    /// never hold two handles and always leave the loaded track under the cursor
    #[test]
    fn random_operations_keep_one_live_handle(
        len in 1usize..10,
        ops in prop::collection::vec(arbitrary_op(), 0..40)
    ) {
        let rt = runtime();

        let (snapshot, loads, live, max_live, expected_index) = rt.block_on(async {
            let engine = FakeEngine::new();
            let session = PlaybackSession::new(engine.clone());
            let queued = make_tracks(len);
            session.set_queue_and_play(queued.clone(), 0).await.unwrap();

            let mut model = Queue::new();
            model.replace(queued.clone(), 0).unwrap();

            for op in ops {
                match op {
                    Op::Next => {
                        session.play_next().await;
                        model.advance();
                    }
                    Op::Prev => {
                        session.play_prev().await;
                        model.retreat();
                    }
                    Op::Toggle => session.toggle_play_pause().await,
                    Op::PlayQueued(i) => {
                        session.play_track(queued[i % len].clone()).await;
                        model.select(i % len).unwrap();
                    }
                    Op::Finish => {
                        let loaded = engine.loads().len();
                        engine.emit(engine.last_handle().unwrap(), MediaStatus::Finished);
                        eventually(|| engine.loads().len() == loaded + 1).await;
                        model.advance();
                    }
                }
            }

            (
                session.snapshot(),
                engine.loads(),
                engine.live_count(),
                engine.max_live(),
                model.current_index(),
            )
        });

        prop_assert_eq!(snapshot.current_index, expected_index);
        prop_assert_eq!(snapshot.queue_length, len);
        prop_assert!(snapshot.is_loaded);
        prop_assert_eq!(live, 1);
        prop_assert_eq!(max_live, 1);

        let current = snapshot.current_track.unwrap();
        prop_assert_eq!(loads.last().unwrap(), current.audio.as_str());
    }
}
