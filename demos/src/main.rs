//! Maze demo: runs the A* engine on a worker thread and prints the grid.
//!
//! The search itself runs on a spawned thread holding the grid, with the
//! main thread keeping a [`SearchControl`] clone, the intended setup for a
//! UI driving the engine. Set `RUST_LOG=debug` (or `trace`) to see the
//! engine's log output.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use stargrid_core::Point;
use stargrid_paths::{CellKind, Node, NodeObserver, Pathfinder, SearchControl};

const ROWS: i32 = 12;
const COLUMNS: i32 = 16;

fn build_maze() -> Pathfinder {
    let mut pf = Pathfinder::new(ROWS, COLUMNS, true);
    pf.set_start(1, 1);
    pf.set_end(10, 14);

    // Two staggered walls, each with a one-cell gap.
    for y in 0..12 {
        pf.set_barrier(4, y);
    }
    for y in 5..COLUMNS {
        pf.set_barrier(8, y);
    }
    pf
}

fn render(pf: &Pathfinder) {
    let glyph = |kind: CellKind| match kind {
        CellKind::Unevaluated => '.',
        CellKind::Open => 'o',
        CellKind::Closed => 'x',
        CellKind::Start => 'S',
        CellKind::End => 'E',
        CellKind::Barrier => '#',
        CellKind::Path => '*',
    };
    for x in 0..pf.rows() {
        let mut line = String::with_capacity(pf.columns() as usize);
        for y in 0..pf.columns() {
            if let Some(node) = pf.node(Point::new(x, y)) {
                line.push(glyph(node.kind()));
            }
        }
        println!("{line}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut pf = build_maze();

    // Count every node update the way a renderer would repaint cells.
    let updates = Arc::new(AtomicU64::new(0));
    let sink = Arc::clone(&updates);
    let observer: NodeObserver = Arc::new(move |_n: &Node| {
        sink.fetch_add(1, Ordering::Relaxed);
    });
    for x in 0..ROWS {
        for y in 0..COLUMNS {
            pf.set_observer(Point::new(x, y), Some(Arc::clone(&observer)));
        }
    }

    // Start paused: the worker blocks at its first checkpoint until the
    // main thread resumes it.
    let control = SearchControl::new();
    control.pause();
    let remote = control.clone();
    let worker = thread::spawn(move || {
        let result = pf.find_path_with(&remote);
        (pf, result)
    });
    println!("search paused, resuming shortly...");
    thread::sleep(Duration::from_millis(50));
    control.resume();
    let (mut pf, result) = worker.join().expect("search thread panicked");

    println!("8-connected:");
    render(&pf);
    match result? {
        Some(path) => println!(
            "path of {} cells, {} node updates\n",
            path.len(),
            updates.load(Ordering::Relaxed)
        ),
        None => println!("no path\n"),
    }

    // Same maze, orthogonal moves only.
    pf.reset();
    pf.set_diagonal(false);
    let result = pf.find_path()?;

    println!("4-connected:");
    render(&pf);
    match result {
        Some(path) => println!("path of {} cells", path.len()),
        None => println!("no path"),
    }

    Ok(())
}
