// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service boundary layer for the CrewRota Shift Scheduling System.
//!
//! The operations here are the contract the surrounding application
//! consumes: rotation generation, coverage gap computation, gap fill,
//! the swap workflow, hours roll-ups, and the supervisor queue
//! listings. There is no wire protocol and no authentication — both
//! belong to the surrounding application, which calls these functions
//! with an already-authenticated [`crew_rota_audit::Actor`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod operations;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ServiceError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use operations::{
    approve_swap, claim_open_swap, compute_coverage_gaps_in_range, create_swap_request,
    deny_swap, fill_gap, generate_rotation, hours_in_window, list_assignments,
    list_swap_requests,
};
pub use request_response::{
    ApproveSwapRequest, ApproveSwapResponse, AssignmentView, ClaimOpenSwapRequest,
    ClaimOpenSwapResponse, ComputeCoverageGapsRequest, ComputeCoverageGapsResponse,
    CoverageGapView, CreateSwapRequestRequest, CreateSwapRequestResponse, DenySwapRequest,
    DenySwapResponse, FillGapRequest, FillGapResponse, GenerateRotationRequest,
    GenerateRotationResponse, HoursInWindowRequest, HoursInWindowResponse,
    ListAssignmentsRequest, ListAssignmentsResponse, ListSwapRequestsRequest,
    ListSwapRequestsResponse, SwapRequestView,
};
