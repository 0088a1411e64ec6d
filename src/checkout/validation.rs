//! Pure field checks for checkout input.
//!
//! Nothing here touches state, so the same checks can gate a "next" button in the UI
//! and run again right before submission against the latest basket.

use crate::model::{BasketState, ContactDetails, OrderForm, PaymentDetails, PaymentMethod};

pub const INVALID_EMAIL: &str = "Invalid email address";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const ADDRESS_REQUIRED: &str = "Address is required";
pub const PAYMENT_REQUIRED: &str = "Payment method is required";
pub const BASKET_EMPTY: &str = "Basket is empty";

/// Checks a whole form against `basket`.
///
/// Every failing field is reported, in a fixed order: email, phone, address, payment,
/// then the basket itself. An empty result means the form may be submitted.
pub fn validate(form: &OrderForm, basket: &BasketState) -> Vec<String> {
    let mut errors = Vec::new();
    check_email(&form.email, &mut errors);
    check_phone(&form.phone, &mut errors);
    check_address(&form.address, &mut errors);
    check_payment(form.payment, &mut errors);
    if basket.is_empty() {
        errors.push(BASKET_EMPTY.to_string());
    }
    errors
}

/// Checks the first checkout step on its own: address, then payment.
pub fn validate_payment(details: &PaymentDetails) -> Vec<String> {
    let mut errors = Vec::new();
    check_address(&details.address, &mut errors);
    check_payment(details.payment, &mut errors);
    errors
}

/// Checks the second checkout step on its own: email, then phone.
pub fn validate_contacts(details: &ContactDetails) -> Vec<String> {
    let mut errors = Vec::new();
    check_email(&details.email, &mut errors);
    check_phone(&details.phone, &mut errors);
    errors
}

fn check_email(email: &str, errors: &mut Vec<String>) {
    if !email.contains('@') {
        errors.push(INVALID_EMAIL.to_string());
    }
}

fn check_phone(phone: &str, errors: &mut Vec<String>) {
    if phone.trim().is_empty() {
        errors.push(PHONE_REQUIRED.to_string());
    }
}

fn check_address(address: &str, errors: &mut Vec<String>) {
    if address.trim().is_empty() {
        errors.push(ADDRESS_REQUIRED.to_string());
    }
}

fn check_payment(payment: Option<PaymentMethod>, errors: &mut Vec<String>) {
    if payment.is_none() {
        errors.push(PAYMENT_REQUIRED.to_string());
    }
}
