//! A deferred work queue of one-shot jobs.
//!
//! Jobs are [`UniqueFn`] values: move-only callables qualify, and the small
//! ones are stored inline in the queue instead of each getting a heap box.

use smallfn::UniqueFn;

type Job = UniqueFn<dyn FnOnce() -> String>;

#[derive(Default)]
struct WorkQueue {
    jobs: Vec<Job>,
}

impl WorkQueue {
    fn defer(&mut self, job: Job) {
        self.jobs.push(job);
    }

    fn drain(&mut self) -> Vec<String> {
        self.jobs.drain(..).map(|job| job.call_once(())).collect()
    }
}

fn main() {
    let mut queue = WorkQueue::default();

    let quick = 2 + 2;
    queue.defer(UniqueFn::new(move || format!("quick math: {quick}")));

    // Move-only capture: a clonable wrapper would reject this closure.
    let report = Box::new(String::from("boxed payload riding along"));
    queue.defer(UniqueFn::new(move || *report));

    for (index, job) in queue.jobs.iter().enumerate() {
        println!("job {index} stored {:?}", job.storage());
    }

    for line in queue.drain() {
        println!("{line}");
    }
}
