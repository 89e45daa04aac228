//! Instance validation and network assembly for the Virtual Network Function (VNF) placement problem.
//!
//! A problem [`Instance`](entities::Instance) is read from a numeric token stream, checked for
//! structural validity and assembled into a [`Network`](entities::Network) of nodes, links and servers.
//! Candidate solutions combine a [`Placement`](entities::Placement) with a routing table
//! ([`KeyedMatrix`](util::KeyedMatrix)) in a [`Solution`](entities::Solution).

/// Entities to model the VNF placement problem
pub mod entities;

/// Importing problem instances into this library
pub mod io;

/// Helper functions and structures which do not belong to any specific module
pub mod util;
