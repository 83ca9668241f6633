use vertexpad::{EditorConfig, Graph, Vec2};
use std::time::Instant;

// Grid of nodes where every horizontal neighbour pair carries a small fanned
// bundle, so picks exercise both straight and curved edges.
fn build_fanned_grid(edges_target: usize, bundle: usize) -> Graph {
    let mut g = Graph::new();
    let w = 60usize; let h = 60usize;
    let mut nodes = Vec::with_capacity(w*h);
    for j in 0..h { for i in 0..w { nodes.push(g.add_node(i as f32 * 120.0, j as f32 * 90.0)); } }
    let mut ecount = 0usize;
    'outer: for j in 0..h { for i in 0..(w-1) {
        let a = nodes[j*w+i]; let b = nodes[j*w+i+1];
        for _ in 0..bundle {
            if g.add_edge(a, b, false).is_ok() { ecount += 1; }
            if ecount >= edges_target { break 'outer; }
        }
    } }
    g
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() { return 0.0; }
    let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[idx.min(sorted.len()-1)]
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut edges = 3000usize;
    let mut picks = 2000usize;
    let mut bundle = 3usize;
    let mut tol = 10.0f32;
    let mut assert_ms: Option<f64> = None;
    for a in &args[1..] {
        if let Some(val)=a.strip_prefix("--edges=") { if let Ok(v)=val.parse() { edges=v; } }
        else if let Some(val)=a.strip_prefix("--picks=") { if let Ok(v)=val.parse() { picks=v; } }
        else if let Some(val)=a.strip_prefix("--bundle=") { if let Ok(v)=val.parse() { bundle=v; } }
        else if let Some(val)=a.strip_prefix("--tol=") { if let Ok(v)=val.parse() { tol=v; } }
        else if let Some(val)=a.strip_prefix("--assert-ms=") { if let Ok(v)=val.parse() { assert_ms=Some(v); } }
    }

    let cfg = EditorConfig { edge_tolerance: tol, ..EditorConfig::default() };
    let g = build_fanned_grid(edges, bundle.max(1));

    let mut times_ms: Vec<f64> = Vec::with_capacity(picks);
    let start_all = Instant::now();
    let mut hits = 0usize;
    for k in 0..picks {
        // Alternate between node centres and points a little off the bundles.
        let x = (k % 50) as f32 * 120.0 + if k % 2 == 0 { 0.0 } else { 60.0 };
        let y = ((k/50) % 50) as f32 * 90.0 + if k % 3 == 0 { 0.0 } else { 12.0 };
        let t0 = Instant::now();
        if g.pick(Vec2::new(x, y), &cfg).is_some() { hits += 1; }
        times_ms.push(t0.elapsed().as_secs_f64() * 1000.0);
    }
    let dur_all = start_all.elapsed().as_secs_f64() * 1000.0;
    times_ms.sort_by(|a,b| a.total_cmp(b));
    let med = percentile(&times_ms, 0.5);
    let p90 = percentile(&times_ms, 0.9);
    let p99 = percentile(&times_ms, 0.99);
    println!("edges={} bundle={} picks={} tol={} hits={} total_ms={:.3} median_ms={:.4} p90_ms={:.4} p99_ms={:.4}", g.edge_count(), bundle, picks, tol, hits, dur_all, med, p90, p99);
    if let Some(th) = assert_ms { if med > th { eprintln!("FAIL: median {:.4} ms > threshold {:.3} ms", med, th); std::process::exit(1); } }
}
