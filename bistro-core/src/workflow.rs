//! Submission workflows: checkout, reservation and review
//!
//! A workflow takes a validated request, waits on the [`Backend`], and on
//! success builds the entity to store. The round trip is cancellable through
//! the token handed out by the task manager; a cancelled or rejected call
//! builds nothing.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;

use crate::action::StoreAction;
use crate::config::SubmitDelays;
use crate::error::SubmitError;
use crate::forms::{CheckoutRequest, ReservationRequest, ReviewRequest};
use crate::ids::{IdGenerator, IdKind};
use crate::model::{
    FulfillmentKind, Order, OrderItem, OrderStatus, Reservation, ReservationStatus, Review,
};
use crate::money::Pricing;
use crate::tasks::TaskKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Workflow {
    Checkout,
    Reservation,
    Review,
}

impl Workflow {
    pub fn as_str(self) -> &'static str {
        match self {
            Workflow::Checkout => "checkout",
            Workflow::Reservation => "reservation",
            Workflow::Review => "review",
        }
    }

    /// Task manager key; one submission per workflow at a time
    pub fn key(self) -> TaskKey {
        TaskKey::new(format!("submit:{}", self.as_str()))
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Workflow::Checkout => "Failed to place order. Please try again.",
            Workflow::Reservation => "Failed to submit reservation. Please try again.",
            Workflow::Review => "Failed to submit review. Please try again.",
        }
    }

    pub fn cancelled_message(self) -> &'static str {
        match self {
            Workflow::Checkout => "Order cancelled before it was placed.",
            Workflow::Reservation => "Reservation request cancelled.",
            Workflow::Review => "Review submission cancelled.",
        }
    }
}

/// The remote side of a submission
pub trait Backend: Send + Sync {
    /// Resolve once the call went through; must honor `token`
    fn submit(
        &self,
        workflow: Workflow,
        token: &CancellationToken,
    ) -> impl Future<Output = Result<(), SubmitError>> + Send;
}

/// Stand-in backend that accepts everything after a fixed delay
#[derive(Clone, Debug, Default)]
pub struct SimulatedBackend {
    delays: SubmitDelays,
}

impl SimulatedBackend {
    pub fn new(delays: SubmitDelays) -> Self {
        Self { delays }
    }

    pub fn delay(&self, workflow: Workflow) -> Duration {
        match workflow {
            Workflow::Checkout => self.delays.checkout,
            Workflow::Reservation => self.delays.reservation,
            Workflow::Review => self.delays.review,
        }
    }
}

impl Backend for SimulatedBackend {
    fn submit(
        &self,
        workflow: Workflow,
        token: &CancellationToken,
    ) -> impl Future<Output = Result<(), SubmitError>> + Send {
        let delay = self.delay(workflow);
        let token = token.clone();
        async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(SubmitError::Cancelled),
                _ = tokio::time::sleep(delay) => Ok(()),
            }
        }
    }
}

/// A validated request waiting for the backend
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Checkout {
        request: CheckoutRequest,
        /// Cart snapshot at submit time
        items: Vec<OrderItem>,
        /// Already rounded to cents
        total: Decimal,
    },
    Reservation(ReservationRequest),
    Review(ReviewRequest),
}

impl Submission {
    /// Freeze the cart and price it
    pub fn checkout(request: CheckoutRequest, cart: &[OrderItem], pricing: &Pricing) -> Self {
        let quote = pricing.quote(cart, request.fulfillment.kind());
        Submission::Checkout {
            request,
            items: cart.to_vec(),
            total: quote.rounded_total(),
        }
    }

    pub fn workflow(&self) -> Workflow {
        match self {
            Submission::Checkout { .. } => Workflow::Checkout,
            Submission::Reservation(_) => Workflow::Reservation,
            Submission::Review(_) => Workflow::Review,
        }
    }

    /// Build the entity the backend accepted
    pub fn complete(self, ids: &IdGenerator, now: DateTime<Utc>) -> Submitted {
        match self {
            Submission::Checkout {
                request,
                items,
                total,
            } => Submitted::Order(Order {
                id: ids.next(IdKind::Order),
                customer: request.customer,
                items,
                total,
                fulfillment: request.fulfillment,
                status: OrderStatus::Pending,
                created_at: now,
            }),
            Submission::Reservation(request) => Submitted::Reservation(Reservation {
                id: ids.next(IdKind::Reservation),
                customer: request.customer,
                date: request.date,
                time: request.time,
                guests: request.guests,
                special_requests: request.special_requests,
                status: ReservationStatus::Pending,
                created_at: now,
            }),
            Submission::Review(request) => Submitted::Review(Review {
                id: ids.next(IdKind::Review),
                customer_name: request.customer_name,
                rating: request.rating,
                comment: request.comment,
                date: now.date_naive(),
                menu_item_id: request.menu_item_id,
            }),
        }
    }
}

/// An entity created by a successful submission
#[derive(Clone, Debug, PartialEq)]
pub enum Submitted {
    Order(Order),
    Reservation(Reservation),
    Review(Review),
}

impl Submitted {
    pub fn workflow(&self) -> Workflow {
        match self {
            Submitted::Order(_) => Workflow::Checkout,
            Submitted::Reservation(_) => Workflow::Reservation,
            Submitted::Review(_) => Workflow::Review,
        }
    }

    pub fn success_message(&self) -> String {
        match self {
            Submitted::Order(order) => {
                let kind = order.fulfillment.kind();
                match kind {
                    FulfillmentKind::Delivery => {
                        format!("Order placed successfully! Estimated delivery: {}", kind.eta())
                    }
                    FulfillmentKind::Takeaway => {
                        format!("Order placed successfully! Ready for pickup in {}", kind.eta())
                    }
                }
            }
            Submitted::Reservation(_) => {
                "Reservation submitted successfully! We'll confirm your booking within 2 hours."
                    .to_string()
            }
            Submitted::Review(_) => "Thank you for your review!".to_string(),
        }
    }

    /// Store mutations that record the entity; checkout also empties the cart
    pub fn into_store_actions(self) -> Vec<StoreAction> {
        match self {
            Submitted::Order(order) => vec![StoreAction::OrderAdd(order), StoreAction::CartClear],
            Submitted::Reservation(reservation) => vec![StoreAction::ReservationAdd(reservation)],
            Submitted::Review(review) => vec![StoreAction::ReviewAdd(review)],
        }
    }
}

/// Run one submission against `backend`
pub async fn submit<B: Backend>(
    backend: &B,
    ids: &IdGenerator,
    submission: Submission,
    token: &CancellationToken,
) -> Result<Submitted, SubmitError> {
    let workflow = submission.workflow();
    tracing::info!(workflow = workflow.as_str(), "submission started");

    if let Err(err) = backend.submit(workflow, token).await {
        tracing::info!(workflow = workflow.as_str(), error = %err, "submission did not go through");
        return Err(err);
    }

    let submitted = submission.complete(ids, Utc::now());
    tracing::info!(workflow = workflow.as_str(), "submission accepted");
    Ok(submitted)
}
