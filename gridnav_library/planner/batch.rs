use super::PathPlanningService;
use crate::messages::{PlanRequest, PlanResponse};
use gridnav_core::GridnavError;
use log::{debug, warn};
use std::thread;

impl PathPlanningService {
    /// Plan independent requests in parallel
    ///
    /// Responses are returned in request order. Worker count comes from
    /// `worker_threads` (0 = one per CPU).
    pub fn plan_batch(&self, requests: &[PlanRequest]) -> Vec<PlanResponse> {
        let num_threads = self.params().worker_count().min(requests.len()).max(1);
        if num_threads == 1 || requests.len() <= 1 {
            return requests.iter().map(|r| self.plan(r)).collect();
        }

        // Overwritten by the workers; a slot keeps this only if its worker panicked
        let lost = GridnavError::Internal("planning worker did not complete".to_string());
        let mut responses = vec![PlanResponse::from_error(&lost); requests.len()];
        let chunk_size = (requests.len() + num_threads - 1) / num_threads;
        debug!(
            "planning batch of {} requests on {} threads",
            requests.len(),
            num_threads
        );

        thread::scope(|s| {
            let mut handles = Vec::new();

            for (request_chunk, response_chunk) in requests
                .chunks(chunk_size)
                .zip(responses.chunks_mut(chunk_size))
            {
                let handle = s.spawn(move || {
                    for (request, response) in request_chunk.iter().zip(response_chunk.iter_mut()) {
                        *response = self.plan(request);
                    }
                });
                handles.push(handle);
            }

            for handle in handles {
                if handle.join().is_err() {
                    warn!("planning worker panicked");
                }
            }
        });

        responses
    }
}
