//! Command line front end for the ordered worker pool.
//!
//! Reads whitespace-delimited tokens from standard input in groups of three,
//! submits each group to the pool as one quadratic equation, and prints the
//! answers from a dedicated printer thread. Because the pool returns results
//! in submission order, the output lines match the input groups one to one
//! even though the equations are solved in parallel.

use log::{debug, error};
use quadpool::prelude::*;
use quadpool::solver::calculate_roots;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    env_logger::init();

    // The main thread reads stdin and the printer thread writes stdout, so
    // leave two hardware threads for them.
    let workers = num_cpus::get().saturating_sub(2).max(1);
    let pool = Arc::new(WorkerPool::with_config(
        PoolConfig::new(workers).with_thread_name_prefix("solver"),
    )?);
    debug!("solving with {} workers", pool.num_workers());

    let printer = thread::spawn({
        let pool = Arc::clone(&pool);
        move || {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            while let Some(answer) = pool.collect() {
                if let Err(e) = writeln!(out, "{}", answer) {
                    error!("failed to write answer: {}", e);
                    break;
                }
            }
        }
    });

    let stdin = io::stdin();
    let mut pending: Vec<String> = Vec::with_capacity(3);
    'read: for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("failed to read stdin: {}", e);
                break;
            }
        };
        for token in line.split_whitespace() {
            pending.push(token.to_string());
            if pending.len() == 3 {
                let group = {
                    let mut tokens = pending.drain(..);
                    (tokens.next(), tokens.next(), tokens.next())
                };
                if let (Some(a), Some(b), Some(c)) = group {
                    if pool.submit(Box::new(calculate_roots), (a, b, c)).is_err() {
                        break 'read;
                    }
                }
            }
        }
    }
    if !pending.is_empty() {
        debug!("ignoring {} trailing token(s)", pending.len());
    }

    // Stop the workers to release the printer thread once every queued
    // equation has been answered.
    pool.shutdown()?;
    if printer.join().is_err() {
        error!("printer thread panicked");
    }

    Ok(())
}
