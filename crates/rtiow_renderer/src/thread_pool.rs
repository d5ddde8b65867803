//! Fixed-size worker pool for render tasks.
//!
//! Workers are scoped threads, so tasks may borrow data that outlives the
//! surrounding [`std::thread::scope`] (the scene, the camera, slices of the
//! output buffer) without reference counting.

use std::panic;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{Scope, ScopedJoinHandle};

type Task<'env> = Box<dyn FnOnce() + Send + 'env>;

struct Queue<'env> {
    tasks: Vec<Task<'env>>,
    should_stop: bool,
}

struct Shared<'env> {
    queue: Mutex<Queue<'env>>,
    available: Condvar,
}

impl<'env> Shared<'env> {
    fn lock(&self) -> MutexGuard<'_, Queue<'env>> {
        // A panicking task never holds the lock, so poisoning carries no torn state
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn request_stop(&self) {
        self.lock().should_stop = true;
        self.available.notify_all();
    }
}

/// A pool of worker threads pulling tasks from a shared queue.
///
/// Tasks run in LIFO order. Call [`ThreadPool::wait_for_completion`] to
/// drain the queue and join the workers.
pub struct ThreadPool<'scope, 'env> {
    shared: Arc<Shared<'env>>,
    workers: Vec<ScopedJoinHandle<'scope, ()>>,
}

impl<'scope, 'env: 'scope> ThreadPool<'scope, 'env> {
    /// Spawn `num_workers` threads inside `scope`.
    ///
    /// # Panics
    ///
    /// Panics if `num_workers` is zero.
    pub fn new(scope: &'scope Scope<'scope, 'env>, num_workers: usize) -> Self {
        assert!(num_workers > 0, "thread pool needs at least one worker");

        let shared = Arc::new(Shared {
            queue: Mutex::new(Queue {
                tasks: Vec::new(),
                should_stop: false,
            }),
            available: Condvar::new(),
        });

        let workers = (0..num_workers)
            .map(|id| {
                let shared = Arc::clone(&shared);
                scope.spawn(move || worker_loop(id, &shared))
            })
            .collect();

        Self { shared, workers }
    }

    /// Number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Queue a task; one idle worker is woken to run it.
    pub fn add_task<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'env,
    {
        self.shared.lock().tasks.push(Box::new(task));
        self.shared.available.notify_one();
    }

    /// Block until every queued task has run and all workers have exited.
    ///
    /// A panic in any task is resumed on the calling thread.
    pub fn wait_for_completion(mut self) {
        self.shared.request_stop();

        let mut first_panic = None;
        for worker in self.workers.drain(..) {
            if let Err(payload) = worker.join() {
                first_panic.get_or_insert(payload);
            }
        }

        if let Some(payload) = first_panic {
            panic::resume_unwind(payload);
        }
    }
}

impl Drop for ThreadPool<'_, '_> {
    fn drop(&mut self) {
        // Without this the scope would wait forever on idle workers
        self.shared.request_stop();
    }
}

fn worker_loop(id: usize, shared: &Shared<'_>) {
    let mut executed = 0usize;

    loop {
        let task = {
            let mut queue = shared.lock();
            while queue.tasks.is_empty() && !queue.should_stop {
                queue = shared
                    .available
                    .wait(queue)
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
            }

            // Keep running tasks after a stop request until the queue is empty
            match queue.tasks.pop() {
                Some(task) => task,
                None => break,
            }
        };

        task();
        executed += 1;
    }

    log::debug!("Worker {id} exiting after {executed} tasks");
}
