//! Multi-threaded producer/consumer tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use jitter_core::{JitterBuffer, JitterBufferConfig, ParkingJitterBuffer};

const FRAME_SIZE: usize = 32;

fn tagged_frame(seq: u32) -> [u8; FRAME_SIZE] {
    let mut frame = [0u8; FRAME_SIZE];
    for chunk in frame.chunks_mut(4) {
        chunk.copy_from_slice(&seq.to_le_bytes());
    }
    frame
}

fn frame_seq(frame: &[u8]) -> u32 {
    let seq = u32::from_le_bytes([frame[0], frame[1], frame[2], frame[3]]);
    assert!(
        frame.chunks(4).all(|chunk| chunk == seq.to_le_bytes()),
        "torn frame observed"
    );
    seq
}

#[test]
fn test_concurrent_producers_keep_order_and_capacity() {
    let buffer = Arc::new(JitterBuffer::new(64, FRAME_SIZE).unwrap());
    let producers: Vec<_> = (0..4u32)
        .map(|worker| {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || {
                let mut accepted = 0u64;
                for n in 0..2_000u32 {
                    let seq = n * 4 + worker;
                    if buffer.put(&tagged_frame(seq), seq) {
                        accepted += 1;
                    }
                    assert!(buffer.count() <= 64);
                }
                accepted
            })
        })
        .collect();

    let accepted: u64 = producers.into_iter().map(|h| h.join().unwrap()).sum();

    let stats = buffer.stats();
    assert_eq!(stats.frames_inserted, accepted);
    assert_eq!(stats.frames_inserted + stats.late_arrivals, 8_000);
    assert!(buffer.is_full());

    let seqs = buffer.sequence_numbers();
    assert!(seqs.windows(2).all(|w| w[0] <= w[1]));

    let mut out = [0u8; FRAME_SIZE];
    let mut played = Vec::new();
    while buffer.get(&mut out) {
        played.push(frame_seq(&out));
    }
    assert_eq!(played, seqs);
}

#[test]
fn test_producer_and_consumer_running_together() {
    let buffer = Arc::new(JitterBuffer::new(16, FRAME_SIZE).unwrap());
    let done = Arc::new(AtomicBool::new(false));

    let producer = {
        let buffer = Arc::clone(&buffer);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for seq in 0..20_000u32 {
                // Swap neighbours to simulate mild reordering
                let seq = if seq % 2 == 0 { seq + 1 } else { seq - 1 };
                buffer.put(&tagged_frame(seq), seq);
            }
            done.store(true, Ordering::Release);
        })
    };

    let consumer = {
        let buffer = Arc::clone(&buffer);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut out = [0u8; FRAME_SIZE];
            let mut played = Vec::new();
            loop {
                if buffer.get(&mut out) {
                    played.push(frame_seq(&out));
                } else if done.load(Ordering::Acquire) && buffer.is_empty() {
                    break;
                } else {
                    thread::yield_now();
                }
            }
            played
        })
    };

    producer.join().unwrap();
    let played = consumer.join().unwrap();

    // Playout may step backwards after the consumer drains the buffer, but a
    // frame is never handed out twice
    let mut unique = played.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), played.len());
    assert!(played.iter().all(|&seq| seq < 20_000));

    let stats = buffer.stats();
    assert_eq!(stats.frames_played, played.len() as u64);
    assert_eq!(
        stats.frames_inserted,
        stats.frames_played + stats.overflow_evictions
    );
}

#[test]
fn test_parking_lock_under_contention() {
    let buffer = Arc::new(ParkingJitterBuffer::from_config(JitterBufferConfig::new(8, FRAME_SIZE)).unwrap());
    let handles: Vec<_> = (0..4u32)
        .map(|worker| {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || {
                for n in 0..500u32 {
                    let seq = n * 4 + worker;
                    buffer.put(&tagged_frame(seq), seq);
                    let _ = buffer.pop();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = buffer.stats();
    assert_eq!(
        stats.frames_inserted,
        stats.frames_played + stats.overflow_evictions + buffer.count() as u64
    );
}
