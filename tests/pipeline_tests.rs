//! Pipeline runtime tests: end-to-end sorting, topology, teardown and error paths.

use proptest::prelude::*;
use stagepipe::engine::{checked_sort_pipeline, merge_sort_pipeline, run_sort, sort_pipeline};
use stagepipe::pipeline::{Channel, Crew, PipelineTuning, ResourceLedger, run_pipeline};
use stagepipe::{List, Pipeline, PipelineError, PipelineOpts};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn ints(v: &[i32]) -> List<i32> {
    List::from(v.to_vec())
}

// --- end to end ---

#[test]
fn test_sort_examples() {
    assert_eq!(run_sort(ints(&[3, 1, 2])).unwrap().into_vec(), vec![1, 2, 3]);
    assert_eq!(run_sort(ints(&[])).unwrap().into_vec(), Vec::<i32>::new());
    assert_eq!(run_sort(ints(&[5])).unwrap().into_vec(), vec![5]);
}

#[test]
fn test_merge_sort_examples() {
    let p = merge_sort_pipeline();
    assert_eq!(p.run(ints(&[3, 1, 2])).unwrap().into_vec(), vec![1, 2, 3]);
    assert_eq!(p.run(ints(&[])).unwrap().into_vec(), Vec::<i32>::new());
    assert_eq!(p.run(ints(&[5])).unwrap().into_vec(), vec![5]);
    assert_eq!(
        p.stage_names(),
        &["halve".to_string(), "sort_halves".to_string(), "merge".to_string()]
    );
}

#[test]
fn test_pipeline_is_reusable() {
    let p = sort_pipeline();
    for n in 0..20 {
        let input: List<i32> = (0..n).rev().collect();
        let expected: Vec<i32> = (0..n).collect();
        assert_eq!(p.run(input).unwrap().into_vec(), expected);
    }
}

#[test]
fn test_domain_failure_is_data() {
    let p = checked_sort_pipeline(2);
    let out = p.run(ints(&[3, 2, 1])).unwrap();
    assert!(out.is_left());
    let out = p.run(ints(&[2, 1])).unwrap();
    assert_eq!(out.into_right().unwrap().into_vec(), vec![1, 2]);
}

// --- topology and teardown ---

#[test]
fn test_no_leaked_threads_or_channels() {
    let ledger = Arc::new(ResourceLedger::new());
    let out = sort_pipeline()
        .run_tracked(ints(&[9, 8, 7]), &ledger)
        .unwrap();
    assert_eq!(out.into_vec(), vec![7, 8, 9]);
    let snap = ledger.snapshot();
    assert_eq!(snap.channels_created, 2);
    assert_eq!(snap.channels_disposed, 2);
    assert_eq!(snap.threads_spawned, 1);
    assert_eq!(snap.threads_joined, 1);
}

#[test]
fn test_each_stage_runs_exactly_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let (c1, c2) = (Arc::clone(&calls), Arc::clone(&calls));
    let p = Pipeline::new()
        .stage("a", move |x: u64| {
            c1.fetch_add(1, Ordering::SeqCst);
            x + 1
        })
        .stage("b", move |x: u64| {
            c2.fetch_add(1, Ordering::SeqCst);
            x * 3
        });
    assert_eq!(p.run(1).unwrap(), 6);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_stages_run_off_the_caller_thread() {
    let caller = std::thread::current().id();
    let p = Pipeline::new().stage("where", |_: ()| std::thread::current().id());
    assert_ne!(p.run(()).unwrap(), caller);
}

#[test]
fn test_panicking_stage_is_reported_and_joined() {
    let ledger = Arc::new(ResourceLedger::new());
    let p = Pipeline::new()
        .stage("boom", |x: i32| -> i32 {
            if x > 0 {
                panic!("stage failure");
            }
            x
        })
        .stage("after", |x: i32| x + 1);
    let err = p.run_tracked(1, &ledger).unwrap_err();
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::StagePanicked { stage }) => assert_eq!(stage, "boom"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(ledger.snapshot().is_balanced());
}

#[test]
fn test_spawn_failure_aborts_and_releases_everything() {
    let ledger = Arc::new(ResourceLedger::new());
    let opts = PipelineOpts {
        stack_size: Some(usize::MAX / 2),
        ..PipelineOpts::default()
    };
    let p = Pipeline::new()
        .stage("a", |x: i32| x + 1)
        .stage("b", |x: i32| x * 2)
        .with_opts(&opts)
        .unwrap();
    let err = p.run_tracked(1, &ledger).unwrap_err();
    match err.downcast_ref::<PipelineError>() {
        Some(PipelineError::Spawn { stage, .. }) => assert_eq!(stage, "a"),
        other => panic!("unexpected error: {:?}", other),
    }
    let snap = ledger.snapshot();
    assert_eq!(snap.threads_spawned, 0);
    assert!(snap.is_balanced());
}

// --- options ---

#[test]
fn test_larger_capacity_still_sorts() {
    let opts = PipelineOpts {
        channel_cap: 8,
        ..PipelineOpts::default()
    };
    let out = run_pipeline(&merge_sort_pipeline(), ints(&[4, 4, -1, 0]), &opts).unwrap();
    assert_eq!(out.into_vec(), vec![-1, 0, 4, 4]);
}

#[test]
fn test_zero_capacity_rejected() {
    let opts = PipelineOpts {
        channel_cap: 0,
        ..PipelineOpts::default()
    };
    let err = run_pipeline(&sort_pipeline(), ints(&[1]), &opts).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PipelineError>(),
        Some(PipelineError::InvalidCapacity(0))
    ));
}

#[test]
fn test_custom_thread_prefix() {
    let opts = PipelineOpts {
        thread_name_prefix: "gen".to_string(),
        ..PipelineOpts::default()
    };
    let p = Pipeline::new()
        .stage("proc1", |_: ()| std::thread::current().name().map(str::to_string))
        .with_opts(&opts)
        .unwrap();
    assert_eq!(p.run(()).unwrap().as_deref(), Some("gen-proc1"));
}

// --- channel contract ---

#[test]
fn test_dispose_while_thread_live_is_flagged() {
    let ledger = Arc::new(ResourceLedger::new());
    let tuning = PipelineTuning::default();
    let (tx, rx, mut record) = Channel::<i32>::create(1, &ledger).unwrap().split();
    let mut crew = Crew::new(&ledger, &tuning);
    crew.spawn("echo", move || {
        let _ = rx.recv();
    })
    .unwrap();

    assert!(matches!(
        record.dispose(),
        Err(PipelineError::DisposeWhileInUse { channel: 1, live: 1 })
    ));

    tx.send(5).unwrap();
    crew.join_all().unwrap();
    record.dispose().unwrap();
    assert!(matches!(
        record.dispose(),
        Err(PipelineError::DoubleDispose { channel: 1 })
    ));
    assert!(ledger.snapshot().is_balanced());
}

#[test]
fn test_capacity_one_send_blocks_until_taken() {
    let ledger = Arc::new(ResourceLedger::new());
    let chan = Channel::create(1, &ledger).unwrap();
    chan.send(1).unwrap();
    assert_eq!(chan.occupancy(), 1);
    let (tx, rx, _record) = chan.split();
    assert!(tx.try_send(2).is_err());
    assert_eq!(rx.recv().unwrap(), 1);
    assert!(tx.try_send(2).is_ok());
}

// --- properties ---

proptest! {
    #[test]
    fn prop_sort_output_is_sorted_permutation(input in prop::collection::vec(any::<i32>(), 0..200)) {
        let out = run_sort(List::from(input.clone())).unwrap().into_vec();
        prop_assert!(out.windows(2).all(|w| w[0] <= w[1]));
        let mut expected = input;
        expected.sort();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn prop_merge_sort_matches_sort(input in prop::collection::vec(-50i32..50, 0..100)) {
        let a = merge_sort_pipeline().run(List::from(input.clone())).unwrap();
        let b = run_sort(List::from(input)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_single_delivery_in_order(values in prop::collection::vec(any::<u16>(), 0..64)) {
        let ledger = Arc::new(ResourceLedger::new());
        let (tx, rx, _record) = Channel::<u16>::create(1, &ledger).unwrap().split();
        let expected = values.clone();
        let producer = std::thread::spawn(move || {
            for v in values {
                tx.send(v).unwrap();
            }
        });
        let received: Vec<u16> = rx.iter().collect();
        producer.join().unwrap();
        prop_assert_eq!(received, expected);
    }
}
