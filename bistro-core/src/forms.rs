//! Form state and validation
//!
//! Forms hold raw user input. `validate` either produces a typed request
//! ready for a workflow, or a [`FieldErrors`] map naming every field that is
//! wrong. Validation never panics and never touches the store.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::model::{
    Category, Customer, Fulfillment, FulfillmentKind, Id, MenuItem, MenuItemPatch,
};

/// Stock image for menu items created without one
pub const DEFAULT_IMAGE: &str = "https://images.example.com/menu/default.jpg";
/// Rating given to a newly created menu item
pub const DEFAULT_RATING: f32 = 4.5;

pub const MIN_GUESTS: u8 = 1;
pub const MAX_GUESTS: u8 = 12;
pub const DEFAULT_GUESTS: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Address,
    Date,
    Time,
    Guests,
    Rating,
    Comment,
    Description,
    Price,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::Date => "date",
            Field::Time => "time",
            Field::Guests => "guests",
            Field::Rating => "rating",
            Field::Comment => "comment",
            Field::Description => "description",
            Field::Price => "price",
        }
    }
}

/// Field → message map; empty means the form is valid
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }

    /// Drop the error of one field, returning whether there was one
    pub fn clear(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn into_result<T>(self, ok: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(ok())
        } else {
            Err(self)
        }
    }
}

/// Loose shape check: something, `@`, something, `.`, something
pub fn looks_like_email(input: &str) -> bool {
    input.split_whitespace().any(|token| {
        token.char_indices().any(|(at, c)| {
            if c != '@' || at == 0 {
                return false;
            }
            let domain = &token[at + 1..];
            domain
                .char_indices()
                .any(|(dot, c)| c == '.' && dot > 0 && dot + 1 < domain.len())
        })
    })
}

/// Bookable slots: 11:00 to 14:30 and 17:00 to 21:30, every half hour
pub fn time_slots() -> Vec<NaiveTime> {
    (11..15)
        .chain(17..22)
        .flat_map(|hour| [0, 30].map(move |minute| (hour, minute)))
        .filter_map(|(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0))
        .collect()
}

fn check_contact(errors: &mut FieldErrors, name: &str, email: &str, phone: &str) {
    if name.trim().is_empty() {
        errors.insert(Field::Name, "Name is required");
    }
    if email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !looks_like_email(email) {
        errors.insert(Field::Email, "Please enter a valid email");
    }
    if phone.trim().is_empty() {
        errors.insert(Field::Phone, "Phone number is required");
    }
}

fn customer(name: &str, email: &str, phone: &str) -> Customer {
    Customer {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        phone: phone.trim().to_string(),
    }
}

fn optional(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

// ===== Checkout =====

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Only read for delivery
    pub address: String,
    pub fulfillment: FulfillmentKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub customer: Customer,
    pub fulfillment: Fulfillment,
}

impl CheckoutForm {
    pub fn validate(&self) -> Result<CheckoutRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_contact(&mut errors, &self.name, &self.email, &self.phone);
        if self.fulfillment == FulfillmentKind::Delivery && self.address.trim().is_empty() {
            errors.insert(Field::Address, "Delivery address is required");
        }
        errors.into_result(|| CheckoutRequest {
            customer: customer(&self.name, &self.email, &self.phone),
            fulfillment: match self.fulfillment {
                FulfillmentKind::Delivery => Fulfillment::Delivery {
                    address: self.address.trim().to_string(),
                },
                FulfillmentKind::Takeaway => Fulfillment::Takeaway,
            },
        })
    }
}

// ===== Reservation =====

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub time: Option<NaiveTime>,
    pub guests: u8,
    pub special_requests: String,
}

impl Default for ReservationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            date: String::new(),
            time: None,
            guests: DEFAULT_GUESTS,
            special_requests: String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservationRequest {
    pub customer: Customer,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: u8,
    pub special_requests: Option<String>,
}

impl ReservationForm {
    /// Validate against `today`; booking for today is allowed
    pub fn validate(&self, today: NaiveDate) -> Result<ReservationRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_contact(&mut errors, &self.name, &self.email, &self.phone);

        let date = if self.date.trim().is_empty() {
            errors.insert(Field::Date, "Date is required");
            None
        } else {
            match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
                Ok(date) if date < today => {
                    errors.insert(Field::Date, "Date cannot be in the past");
                    None
                }
                Ok(date) => Some(date),
                Err(_) => {
                    errors.insert(Field::Date, "Please enter a date as YYYY-MM-DD");
                    None
                }
            }
        };

        match self.time {
            None => errors.insert(Field::Time, "Time is required"),
            Some(time) if !time_slots().contains(&time) => {
                errors.insert(Field::Time, "Please choose an available time")
            }
            Some(_) => {}
        }

        if !(MIN_GUESTS..=MAX_GUESTS).contains(&self.guests) {
            errors.insert(Field::Guests, "Number of guests must be between 1 and 12");
        }

        match (date, self.time) {
            (Some(date), Some(time)) if errors.is_empty() => Ok(ReservationRequest {
                customer: customer(&self.name, &self.email, &self.phone),
                date,
                time,
                guests: self.guests,
                special_requests: optional(&self.special_requests),
            }),
            _ => Err(errors),
        }
    }

    /// Step through the available slots, starting at the first one
    pub fn cycle_time(&mut self, forward: bool) {
        let slots = time_slots();
        let current = self.time.and_then(|t| slots.iter().position(|s| *s == t));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % slots.len(),
            (Some(i), false) => (i + slots.len() - 1) % slots.len(),
        };
        self.time = slots.get(next).copied();
    }
}

// ===== Review =====

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewForm {
    pub name: String,
    /// 0 means no rating picked yet
    pub rating: u8,
    pub comment: String,
    pub menu_item: Option<Id>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRequest {
    pub customer_name: String,
    pub rating: u8,
    pub comment: String,
    pub menu_item_id: Option<Id>,
}

impl ReviewForm {
    pub fn validate(&self) -> Result<ReviewRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert(Field::Name, "Name is required");
        }
        if !(1..=5).contains(&self.rating) {
            errors.insert(Field::Rating, "Please select a rating");
        }
        if self.comment.trim().is_empty() {
            errors.insert(Field::Comment, "Please write a review");
        }
        errors.into_result(|| ReviewRequest {
            customer_name: self.name.trim().to_string(),
            rating: self.rating,
            comment: self.comment.trim().to_string(),
            menu_item_id: self.menu_item.clone(),
        })
    }
}

// ===== Admin menu item editor =====

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: Category,
    pub image: String,
    pub popular: bool,
}

impl Default for MenuItemForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: Category::Breakfast,
            image: String::new(),
            popular: false,
        }
    }
}

/// A validated menu item without identity or review stats
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItemDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub image: Option<String>,
    pub popular: bool,
}

impl MenuItemForm {
    /// Prefill from an existing item for editing
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            category: item.category,
            image: item.image.clone(),
            popular: item.popular,
        }
    }

    pub fn validate(&self) -> Result<MenuItemDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert(Field::Name, "Name is required");
        }
        if self.description.trim().is_empty() {
            errors.insert(Field::Description, "Description is required");
        }
        let price = match self.price.trim().parse::<Decimal>() {
            Ok(price) if !price.is_sign_negative() => Some(price),
            _ => {
                errors.insert(Field::Price, "Please enter a valid price");
                None
            }
        };
        match price {
            Some(price) if errors.is_empty() => Ok(MenuItemDraft {
                name: self.name.trim().to_string(),
                description: self.description.trim().to_string(),
                price,
                category: self.category,
                image: optional(&self.image),
                popular: self.popular,
            }),
            _ => Err(errors),
        }
    }
}

impl MenuItemDraft {
    /// A brand new item with default review stats
    pub fn into_item(self, id: Id) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            image: self.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            rating: DEFAULT_RATING,
            review_count: 0,
            popular: self.popular,
        }
    }

    /// Edit patch; rating and review count stay as they are
    pub fn into_patch(self) -> MenuItemPatch {
        MenuItemPatch {
            name: Some(self.name),
            description: Some(self.description),
            price: Some(self.price),
            category: Some(self.category),
            image: Some(self.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string())),
            rating: None,
            review_count: None,
            popular: Some(self.popular),
        }
    }
}
