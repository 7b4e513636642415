//! Regional payment dispatch.
//!
//! A closed set of [`Region`](domain::region::Region)s, each settling in exactly
//! one [`Currency`](domain::region::Currency), and a
//! [`PaymentDispatcher`](application::dispatcher::PaymentDispatcher) that routes
//! payment intents to the strategy registered for their region.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
