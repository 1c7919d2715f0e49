//! Concurrency and load testing for the bridge.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use queue_bridge::envelope::deserialize;

mod common;
use common::RecordingQueue;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_enqueue_exactly_once() {
    let queue = RecordingQueue::healthy();
    let (addr, shutdown) = common::start_bridge(queue.clone()).await;

    let concurrency = 100;
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let mut tasks = Vec::new();
    for i in 0..concurrency {
        let client = client.clone();
        let url = format!("http://{}/items/{}?seq={}", addr, i, i);
        tasks.push(tokio::spawn(async move {
            client
                .post(&url)
                .header("x-seq", i.to_string())
                .body(format!("body-{}", i))
                .send()
                .await
                .map(|res| res.status().as_u16())
        }));
    }

    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap(), 200);
    }

    let blobs = queue.blobs();
    assert_eq!(queue.calls(), concurrency);
    assert_eq!(blobs.len(), concurrency);

    let received: BTreeSet<(String, String, String)> = blobs
        .iter()
        .map(|b| deserialize(b).unwrap())
        .map(|e| {
            let seq = e.header_values("X-Seq").unwrap().join(",");
            (e.uri().to_string(), seq, String::from_utf8(e.body().to_vec()).unwrap())
        })
        .collect();
    let expected: BTreeSet<(String, String, String)> = (0..concurrency)
        .map(|i| (format!("/items/{}?seq={}", i, i), i.to_string(), format!("body-{}", i)))
        .collect();
    assert_eq!(received, expected, "no lost or duplicated envelopes");

    shutdown.trigger();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_slow_backend_does_not_serialize_requests() {
    let delay = Duration::from_millis(200);
    let queue = RecordingQueue::slow(delay);
    let (addr, shutdown) = common::start_bridge(queue.clone()).await;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let start = Instant::now();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let client = client.clone();
        let url = format!("http://{}/slow/{}", addr, i);
        tasks.push(tokio::spawn(async move { client.get(&url).send().await }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap().status(), 200);
    }

    // 20 sequential calls would take 4s
    assert!(start.elapsed() < delay * 10, "requests were not handled concurrently");
    assert_eq!(queue.calls(), 20);

    shutdown.trigger();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_load_performance() {
    let queue = RecordingQueue::healthy();
    let (addr, shutdown) = common::start_bridge(queue.clone()).await;

    let concurrency = 20;
    let requests_per_task = 50;
    let total_requests = concurrency * requests_per_task;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let start = Instant::now();

    let mut tasks = Vec::new();
    for t in 0..concurrency {
        let client = client.clone();
        let url = format!("http://{}/load/{}", addr, t);
        tasks.push(tokio::spawn(async move {
            let mut latencies = Vec::new();
            for _ in 0..requests_per_task {
                let req_start = Instant::now();
                if let Ok(res) = client.post(&url).body("x").send().await {
                    if res.status().is_success() {
                        latencies.push(req_start.elapsed());
                    }
                }
            }
            latencies
        }));
    }

    let mut all_latencies = Vec::new();
    for task in tasks {
        all_latencies.extend(task.await.unwrap());
    }

    let duration = start.elapsed();
    assert_eq!(all_latencies.len(), total_requests);
    assert_eq!(queue.calls(), total_requests);

    all_latencies.sort();
    let p50 = all_latencies[all_latencies.len() / 2];
    let p99 = all_latencies[(all_latencies.len() as f64 * 0.99) as usize];

    println!("\n--- Load Test Results ---");
    println!("Total Requests: {}", total_requests);
    println!("Concurrency:    {}", concurrency);
    println!("Total Duration: {:?}", duration);
    println!("Requests/sec:   {:.2}", total_requests as f64 / duration.as_secs_f64());
    println!("P50 Latency:    {:?}", p50);
    println!("P99 Latency:    {:?}", p99);
    println!("-------------------------\n");

    shutdown.trigger();
}
