//! End-to-end coverage of an order lifecycle workflow, including every
//! denial message the per-state tables define.

use std::fmt;
use std::sync::Arc;

use stateflow::{Machine, Transition, TransitionError, Workflow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum OrderState {
    Pending,
    Paid,
    Shipping,
    Delivered,
    Cancelled,
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderState::Pending => "pending",
            OrderState::Paid => "paid",
            OrderState::Shipping => "shipping",
            OrderState::Delivered => "delivered",
            OrderState::Cancelled => "cancelled",
        };
        write!(f, "{}", name)
    }
}

fn order_workflow() -> Arc<Workflow<OrderState, ()>> {
    Arc::new(
        Workflow::builder()
            .transition(
                Transition::new("pay")
                    .sources([OrderState::Pending])
                    .target(OrderState::Paid)
                    .deny_message(
                        OrderState::Paid,
                        "This order was paid. You cannot pay it again.",
                    )
                    .deny_message(OrderState::Shipping, "The order is shipping.")
                    .deny_message(OrderState::Delivered, "this order was finished."),
            )
            .transition(
                Transition::new("dispatch")
                    .sources([OrderState::Paid])
                    .target(OrderState::Shipping)
                    .deny_message(OrderState::Pending, "You need pay order.")
                    .deny_message(OrderState::Shipping, "The order already is shipping.")
                    .deny_message(OrderState::Delivered, "the order already is delivered."),
            )
            .transition(
                Transition::new("delivery")
                    .sources([OrderState::Shipping])
                    .target(OrderState::Delivered)
                    .deny_message(OrderState::Pending, "First, you need pay the order.")
                    .deny_message(OrderState::Paid, "Keep calm. The order is paid.")
                    .deny_message(OrderState::Delivered, "This order was delivered."),
            )
            .build()
            .expect("order workflow is valid"),
    )
}

fn order() -> Machine<OrderState, ()> {
    Machine::new(order_workflow(), OrderState::Pending)
}

fn denial(machine: &mut Machine<OrderState, ()>, name: &str) -> String {
    let err = machine
        .trigger(name, &())
        .expect_err("transition should be denied");
    assert!(matches!(err, TransitionError::NotAllowed { .. }));
    err.to_string()
}

#[test]
fn dispatch_from_pending_message() {
    let mut machine = order();
    assert_eq!(denial(&mut machine, "dispatch"), "You need pay order.");
}

#[test]
fn delivery_from_pending_message() {
    let mut machine = order();
    assert_eq!(
        denial(&mut machine, "delivery"),
        "First, you need pay the order."
    );
}

#[test]
fn pay_from_paid_message() {
    let mut machine = order();
    machine.trigger("pay", &()).unwrap();
    assert_eq!(
        denial(&mut machine, "pay"),
        "This order was paid. You cannot pay it again."
    );
}

#[test]
fn delivery_from_paid_message() {
    let mut machine = order();
    machine.trigger("pay", &()).unwrap();
    assert_eq!(denial(&mut machine, "delivery"), "Keep calm. The order is paid.");
}

#[test]
fn pay_from_shipping_message() {
    let mut machine = order();
    machine.trigger("pay", &()).unwrap();
    machine.trigger("dispatch", &()).unwrap();
    assert_eq!(denial(&mut machine, "pay"), "The order is shipping.");
}

#[test]
fn dispatch_from_shipping_message() {
    let mut machine = order();
    machine.trigger("pay", &()).unwrap();
    machine.trigger("dispatch", &()).unwrap();
    assert_eq!(
        denial(&mut machine, "dispatch"),
        "The order already is shipping."
    );
}

#[test]
fn pay_from_delivered_message() {
    let mut machine = order();
    machine.trigger("pay", &()).unwrap();
    machine.trigger("dispatch", &()).unwrap();
    machine.trigger("delivery", &()).unwrap();
    assert_eq!(denial(&mut machine, "pay"), "this order was finished.");
}

#[test]
fn dispatch_from_delivered_message() {
    let mut machine = order();
    machine.trigger("pay", &()).unwrap();
    machine.trigger("dispatch", &()).unwrap();
    machine.trigger("delivery", &()).unwrap();
    assert_eq!(
        denial(&mut machine, "dispatch"),
        "the order already is delivered."
    );
}

#[test]
fn delivery_from_delivered_message() {
    let mut machine = order();
    machine.trigger("pay", &()).unwrap();
    machine.trigger("dispatch", &()).unwrap();
    machine.trigger("delivery", &()).unwrap();
    assert_eq!(
        denial(&mut machine, "delivery"),
        "This order was delivered."
    );
}

#[test]
fn full_lifecycle_reaches_delivered() {
    let mut machine = order();
    machine.trigger("pay", &()).unwrap();
    machine.trigger("dispatch", &()).unwrap();
    machine.trigger("delivery", &()).unwrap();
    assert_eq!(*machine.state(), OrderState::Delivered);

    let states: Vec<_> = machine.history().iter().map(|r| (r.from, r.to)).collect();
    assert_eq!(
        states,
        [
            (OrderState::Pending, OrderState::Paid),
            (OrderState::Paid, OrderState::Shipping),
            (OrderState::Shipping, OrderState::Delivered),
        ]
    );
}

#[test]
fn denials_never_mutate_state_or_history() {
    let mut machine = order();
    let _ = denial(&mut machine, "dispatch");
    let _ = denial(&mut machine, "delivery");
    assert_eq!(*machine.state(), OrderState::Pending);
    assert!(machine.history().is_empty());
}

#[test]
fn available_transitions_follow_the_lifecycle() {
    let mut machine = order();
    assert_eq!(machine.available_transitions(&()), ["pay"]);
    machine.trigger("pay", &()).unwrap();
    assert_eq!(machine.available_transitions(&()), ["dispatch"]);
    machine.trigger("dispatch", &()).unwrap();
    assert_eq!(machine.available_transitions(&()), ["delivery"]);
    machine.trigger("delivery", &()).unwrap();
    assert!(machine.available_transitions(&()).is_empty());
}

#[test]
fn default_message_names_transition_and_state() {
    // Cancelled has no entry in pay's denial table.
    let mut machine = Machine::new(order_workflow(), OrderState::Cancelled);
    assert_eq!(
        denial(&mut machine, "pay"),
        "cannot invoke transition 'pay' from state 'cancelled'"
    );
}

#[test]
fn guarded_transition_waits_for_its_condition() {
    struct Order {
        paid_amount: u32,
        total: u32,
    }

    let workflow: Arc<Workflow<OrderState, Order>> = Arc::new(
        Workflow::builder()
            .transition(
                Transition::new("dispatch")
                    .sources([OrderState::Paid])
                    .target(OrderState::Shipping)
                    .guard(|order: &Order| order.paid_amount >= order.total),
            )
            .build()
            .unwrap(),
    );

    let mut machine = Machine::new(workflow, OrderState::Paid);
    let underpaid = Order {
        paid_amount: 5,
        total: 10,
    };
    assert!(!machine.can_proceed("dispatch", &underpaid));
    let err = machine.trigger("dispatch", &underpaid).unwrap_err();
    assert!(matches!(err, TransitionError::GuardRejected { .. }));

    let settled = Order {
        paid_amount: 10,
        total: 10,
    };
    machine.trigger("dispatch", &settled).unwrap();
    assert_eq!(*machine.state(), OrderState::Shipping);
}

#[test]
fn wildcard_cancel_fires_from_any_state_but_its_target() {
    let workflow: Arc<Workflow<OrderState, ()>> = Arc::new(
        Workflow::builder()
            .transition(
                Transition::new("pay")
                    .sources([OrderState::Pending])
                    .target(OrderState::Paid),
            )
            .transition(
                Transition::new("cancel")
                    .any_source_but_target()
                    .target(OrderState::Cancelled),
            )
            .build()
            .unwrap(),
    );

    let mut machine = Machine::new(Arc::clone(&workflow), OrderState::Pending);
    machine.trigger("cancel", &()).unwrap();
    assert_eq!(*machine.state(), OrderState::Cancelled);
    assert!(!machine.can_proceed("cancel", &()));

    let mut shipped = Machine::new(workflow, OrderState::Shipping);
    shipped.trigger("cancel", &()).unwrap();
    assert_eq!(*shipped.state(), OrderState::Cancelled);
}
