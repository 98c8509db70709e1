//! In-memory TribeNet server for integration tests
//!
//! Implements `HttpTransport` over a small state machine that mirrors the
//! REST API: bearer tokens, clubs with admins and members, payment orders
//! and admin endpoints. Every request is recorded as `"METHOD /path"`.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tribe_client::{
    ApiRequest, CheckoutOutcome, CheckoutRequest, ClientConfig, ClientResult, ClubRole, Confirm,
    HttpTransport, KeyValueStore, MemoryStore, PaymentConfirmation, RawResponse, TribeClient,
    UserRole,
};

pub const PASSWORD: &str = "password";

#[derive(Debug, Clone)]
struct UserRow {
    id: i64,
    username: String,
    name: String,
    email: String,
    role: UserRole,
}

#[derive(Debug, Clone)]
struct ClubRow {
    id: i64,
    name: String,
    description: String,
    category: String,
    price: Decimal,
}

#[derive(Default)]
struct State {
    users: BTreeMap<i64, UserRow>,
    clubs: BTreeMap<i64, ClubRow>,
    /// (club, user) -> role
    members: BTreeMap<(i64, i64), ClubRole>,
    tokens: HashMap<String, i64>,
    /// Verified payments as (user, club, order id)
    payments: Vec<(i64, i64, String)>,
    orders: Vec<(String, i64, i64)>,
    next_id: i64,
    calls: Vec<String>,
    forced: HashMap<String, (StatusCode, String)>,
    reject_signatures: bool,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn club_json(&self, club: &ClubRow, role: Option<ClubRole>) -> Value {
        let member_count = self.members.keys().filter(|(c, _)| *c == club.id).count();
        let mut value = json!({
            "id": club.id,
            "name": club.name,
            "description": club.description,
            "category": club.category,
            "free": club.price.is_zero(),
            "price": club.price,
            "memberCount": member_count,
        });
        if let Some(role) = role {
            value["clubRole"] = json!(role.as_str());
        }
        value
    }

    fn user_json(user: &UserRow) -> Value {
        json!({
            "id": user.id,
            "username": user.username,
            "name": user.name,
            "email": user.email,
            // the server sends the authority form
            "role": format!("ROLE_{}", user.role.as_str()),
        })
    }

    fn role(&self, club_id: i64, user_id: i64) -> Option<ClubRole> {
        self.members.get(&(club_id, user_id)).copied()
    }

    fn drop_club(&mut self, club_id: i64) {
        self.clubs.remove(&club_id);
        self.members.retain(|(c, _), _| *c != club_id);
    }
}

fn ok(body: Value) -> RawResponse {
    RawResponse::new(StatusCode::OK, body.to_string())
}

fn message(text: &str) -> RawResponse {
    ok(json!({ "message": text }))
}

fn fail(status: StatusCode, text: &str) -> RawResponse {
    RawResponse::new(status, json!({ "message": text }).to_string())
}

fn not_found() -> RawResponse {
    fail(StatusCode::NOT_FOUND, "Not found")
}

fn forbidden() -> RawResponse {
    fail(StatusCode::FORBIDDEN, "Access denied")
}

fn decimal(value: &Value) -> Decimal {
    serde_json::from_value(value.clone()).unwrap_or(Decimal::ZERO)
}

/// The fake server
#[derive(Default)]
pub struct FakeServer {
    state: Mutex<State>,
}

impl FakeServer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_user(&self, username: &str, role: UserRole) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.users.insert(
            id,
            UserRow {
                id,
                username: username.into(),
                name: format!("{username} name"),
                email: format!("{username}@example.com"),
                role,
            },
        );
        id
    }

    /// Add a club with an optional admin; price 0 means free
    pub fn add_club(&self, name: &str, price: i64, admin: Option<i64>) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.clubs.insert(
            id,
            ClubRow {
                id,
                name: name.into(),
                description: format!("{name} meetups"),
                category: "Hobbies".into(),
                price: Decimal::from(price),
            },
        );
        if let Some(admin) = admin {
            state.members.insert((id, admin), ClubRole::Admin);
        }
        id
    }

    pub fn add_member(&self, club_id: i64, user_id: i64, role: ClubRole) {
        self.state
            .lock()
            .unwrap()
            .members
            .insert((club_id, user_id), role);
    }

    pub fn role_of(&self, club_id: i64, user_id: i64) -> Option<ClubRole> {
        self.state.lock().unwrap().role(club_id, user_id)
    }

    pub fn has_club(&self, club_id: i64) -> bool {
        self.state.lock().unwrap().clubs.contains_key(&club_id)
    }

    pub fn has_user(&self, user_id: i64) -> bool {
        self.state.lock().unwrap().users.contains_key(&user_id)
    }

    pub fn verified_payments(&self) -> usize {
        self.state.lock().unwrap().payments.len()
    }

    /// All requests so far, as `"METHOD /path"`
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Answer the next `"METHOD /path"` request with `status` and `body`
    pub fn fail_once(&self, call: &str, status: StatusCode, body: &str) {
        self.state
            .lock()
            .unwrap()
            .forced
            .insert(call.to_string(), (status, body.to_string()));
    }

    /// Invalidate every issued token, as if they expired server-side
    pub fn expire_tokens(&self) {
        self.state.lock().unwrap().tokens.clear();
    }

    pub fn reject_signatures(&self, reject: bool) {
        self.state.lock().unwrap().reject_signatures = reject;
    }

    fn handle(&self, request: ApiRequest) -> RawResponse {
        let mut state = self.state.lock().unwrap();
        let call = format!("{} {}", request.method, request.path);
        state.calls.push(call.clone());
        if let Some((status, body)) = state.forced.remove(&call) {
            return RawResponse::new(status, body);
        }

        let body = request.body.clone().unwrap_or(Value::Null);
        let segments: Vec<&str> = request.path.trim_matches('/').split('/').collect();
        let method = request.method.as_str();

        // Public endpoints
        match (method, segments.as_slice()) {
            ("POST", ["auth", "login"]) => {
                let username = body["username"].as_str().unwrap_or_default();
                let password = body["password"].as_str().unwrap_or_default();
                let user = state
                    .users
                    .values()
                    .find(|u| u.username == username)
                    .cloned();
                return match user {
                    Some(user) if password == PASSWORD => {
                        let token = format!("token-{}-{}", user.id, state.tokens.len());
                        state.tokens.insert(token.clone(), user.id);
                        ok(json!({ "token": token, "user": State::user_json(&user) }))
                    }
                    _ => RawResponse::new(
                        StatusCode::UNAUTHORIZED,
                        json!({ "error": "Invalid credentials" }).to_string(),
                    ),
                };
            }
            ("POST", ["auth", "register"]) => {
                let username = body["username"].as_str().unwrap_or_default().to_string();
                if state.users.values().any(|u| u.username == username) {
                    return RawResponse::new(
                        StatusCode::CONFLICT,
                        json!({ "error": "Username already exists" }).to_string(),
                    );
                }
                let id = state.next_id();
                let role = match body["role"].as_str() {
                    Some("ADMIN") => UserRole::Admin,
                    _ => UserRole::User,
                };
                state.users.insert(
                    id,
                    UserRow {
                        id,
                        username,
                        name: body["name"].as_str().unwrap_or_default().into(),
                        email: body["email"].as_str().unwrap_or_default().into(),
                        role,
                    },
                );
                return message("User registered successfully");
            }
            _ => {}
        }

        let Some(caller) = request
            .token
            .as_ref()
            .and_then(|t| state.tokens.get(t))
            .copied()
        else {
            return RawResponse::new(StatusCode::UNAUTHORIZED, "");
        };
        let caller_is_admin = state
            .users
            .get(&caller)
            .is_some_and(|u| u.role.is_admin());

        let id = |s: &str| s.parse::<i64>().unwrap_or(-1);

        match (method, segments.as_slice()) {
            // ========== Clubs ==========
            ("GET", ["clubs"]) => {
                let clubs: Vec<Value> = state
                    .clubs
                    .values()
                    .map(|c| state.club_json(c, None))
                    .collect();
                ok(json!(clubs))
            }
            ("POST", ["clubs"]) => {
                let club_id = state.next_id();
                let club = ClubRow {
                    id: club_id,
                    name: body["name"].as_str().unwrap_or_default().into(),
                    description: body["description"].as_str().unwrap_or_default().into(),
                    category: body["category"].as_str().unwrap_or_default().into(),
                    price: decimal(&body["price"]),
                };
                state.clubs.insert(club_id, club.clone());
                state.members.insert((club_id, caller), ClubRole::Admin);
                ok(state.club_json(&club, None))
            }
            ("GET", ["clubs", club_id]) => match state.clubs.get(&id(club_id)) {
                Some(club) => ok(state.club_json(club, None)),
                None => not_found(),
            },
            ("PUT", ["clubs", club_id]) => {
                let club_id = id(club_id);
                if state.role(club_id, caller) != Some(ClubRole::Admin) {
                    return forbidden();
                }
                let Some(club) = state.clubs.get_mut(&club_id) else {
                    return not_found();
                };
                club.name = body["name"].as_str().unwrap_or_default().into();
                club.description = body["description"].as_str().unwrap_or_default().into();
                club.category = body["category"].as_str().unwrap_or_default().into();
                club.price = decimal(&body["price"]);
                let club = club.clone();
                ok(state.club_json(&club, None))
            }
            ("DELETE", ["clubs", club_id]) => {
                let club_id = id(club_id);
                if state.role(club_id, caller) != Some(ClubRole::Admin) {
                    return forbidden();
                }
                state.drop_club(club_id);
                message("Club deleted successfully")
            }
            ("GET", ["clubs", club_id, "members"]) => {
                let club_id = id(club_id);
                let members: Vec<Value> = state
                    .members
                    .iter()
                    .filter(|((c, _), _)| *c == club_id)
                    .filter_map(|((_, u), role)| {
                        state.users.get(u).map(|user| {
                            json!({
                                "userId": user.id,
                                "userName": user.username,
                                "email": user.email,
                                "role": role.as_str(),
                            })
                        })
                    })
                    .collect();
                ok(json!(members))
            }
            ("POST", ["clubs", club_id, "join"]) => {
                let club_id = id(club_id);
                let Some(club) = state.clubs.get(&club_id).cloned() else {
                    return not_found();
                };
                if state.role(club_id, caller).is_some() {
                    return fail(StatusCode::BAD_REQUEST, "Already a member");
                }
                let paid = state
                    .payments
                    .iter()
                    .any(|(u, c, _)| *u == caller && *c == club_id);
                if !club.price.is_zero() && !paid {
                    return fail(StatusCode::PAYMENT_REQUIRED, "Payment required");
                }
                state.members.insert((club_id, caller), ClubRole::Member);
                message("Joined club successfully")
            }
            ("DELETE", ["clubs", club_id, "leave"]) => {
                match state.members.remove(&(id(club_id), caller)) {
                    Some(_) => message("Left club successfully"),
                    None => fail(StatusCode::BAD_REQUEST, "Not a member"),
                }
            }
            ("PUT", ["clubs", club_id, "members", user_id, "promote"]) => {
                let (club_id, user_id) = (id(club_id), id(user_id));
                if state.role(club_id, caller) != Some(ClubRole::Admin) {
                    return forbidden();
                }
                match state.members.get_mut(&(club_id, user_id)) {
                    Some(role) => {
                        *role = ClubRole::Admin;
                        message("Member promoted to admin")
                    }
                    None => not_found(),
                }
            }
            ("DELETE", ["clubs", club_id, "members", user_id]) => {
                let (club_id, user_id) = (id(club_id), id(user_id));
                if state.role(club_id, caller) != Some(ClubRole::Admin) {
                    return forbidden();
                }
                match state.members.remove(&(club_id, user_id)) {
                    Some(_) => message("Member removed"),
                    None => not_found(),
                }
            }

            // ========== Users ==========
            ("GET", ["users"]) => {
                let users: Vec<Value> = state
                    .users
                    .values()
                    .filter(|u| u.id != caller)
                    .map(State::user_json)
                    .collect();
                ok(json!(users))
            }
            ("GET", ["users", user_id]) => match state.users.get(&id(user_id)) {
                Some(user) => ok(State::user_json(user)),
                None => not_found(),
            },
            ("GET", ["users", user_id, "clubs"]) => {
                let user_id = id(user_id);
                let clubs: Vec<Value> = state
                    .members
                    .iter()
                    .filter(|((_, u), _)| *u == user_id)
                    .filter_map(|((c, _), role)| {
                        state.clubs.get(c).map(|club| state.club_json(club, Some(*role)))
                    })
                    .collect();
                ok(json!(clubs))
            }

            // ========== Payments ==========
            ("POST", ["payments", "create-order"]) => {
                let order_id = format!("order_{}", state.orders.len() + 1);
                let club_id = body["clubId"].as_i64().unwrap_or_default();
                state.orders.push((order_id.clone(), caller, club_id));
                // amount in paise
                let amount = decimal(&body["amount"]) * Decimal::from(100);
                ok(json!({
                    "orderId": order_id,
                    "amount": amount,
                    "currency": body["currency"],
                    "razorpayKeyId": "rzp_test_key",
                }))
            }
            ("POST", ["payments", "verify"]) => {
                if state.reject_signatures {
                    return fail(StatusCode::BAD_REQUEST, "Invalid payment signature");
                }
                let order_id = body["razorpayOrderId"].as_str().unwrap_or_default().to_string();
                let known = state.orders.iter().any(|(o, _, _)| *o == order_id);
                if !known {
                    return fail(StatusCode::BAD_REQUEST, "Unknown order");
                }
                let user_id = body["userId"].as_i64().unwrap_or_default();
                let club_id = body["clubId"].as_i64().unwrap_or_default();
                state.payments.push((user_id, club_id, order_id));
                message("Payment verified successfully")
            }
            ("GET", ["payments", "user", user_id]) => {
                let user_id = id(user_id);
                let records: Vec<Value> = state
                    .payments
                    .iter()
                    .enumerate()
                    .filter(|(_, (u, _, _))| *u == user_id)
                    .map(|(i, (u, c, o))| {
                        json!({
                            "id": i + 1,
                            "razorpayOrderId": o,
                            "status": "SUCCESS",
                            "userId": u,
                            "clubId": c,
                        })
                    })
                    .collect();
                ok(json!(records))
            }

            // ========== Admin ==========
            ("GET", ["admin", "users"]) if caller_is_admin => {
                let users: Vec<Value> = state.users.values().map(State::user_json).collect();
                ok(json!(users))
            }
            ("DELETE", ["admin", "users", user_id]) if caller_is_admin => {
                let user_id = id(user_id);
                state.users.remove(&user_id);
                state.members.retain(|(_, u), _| *u != user_id);
                message("User deleted successfully")
            }
            ("DELETE", ["admin", "clubs", club_id]) if caller_is_admin => {
                state.drop_club(id(club_id));
                message("Club deleted successfully")
            }
            ("GET" | "DELETE", ["admin", ..]) => forbidden(),

            _ => not_found(),
        }
    }
}

#[async_trait]
impl HttpTransport for FakeServer {
    async fn send(&self, request: ApiRequest) -> ClientResult<RawResponse> {
        Ok(self.handle(request))
    }
}

// ============================================================================
// Client helpers
// ============================================================================

pub fn client_with_store(server: &Arc<FakeServer>, store: Arc<dyn KeyValueStore>) -> TribeClient {
    TribeClient::with_transport(ClientConfig::new("http://fake"), server.clone(), store)
}

pub fn client(server: &Arc<FakeServer>) -> TribeClient {
    client_with_store(server, Arc::new(MemoryStore::new()))
}

/// A client logged in as `username`, with the cache already refreshed
pub async fn logged_in(server: &Arc<FakeServer>, username: &str) -> TribeClient {
    let client = client(server);
    client.login(username, PASSWORD).await.unwrap();
    client.refresh().await.unwrap();
    client
}

// ============================================================================
// Collaborators
// ============================================================================

/// Confirm stub that answers `answer` and records every prompt
pub struct RecordingConfirm {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl RecordingConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirm for RecordingConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

/// Checkout stub with a scripted result
pub struct ScriptedCheckout {
    mode: CheckoutMode,
    requests: Mutex<Vec<CheckoutRequest>>,
}

#[derive(Clone, Copy)]
pub enum CheckoutMode {
    Pay,
    Cancel,
    Fail,
}

impl ScriptedCheckout {
    pub fn new(mode: CheckoutMode) -> Self {
        Self {
            mode,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CheckoutRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl tribe_client::Checkout for ScriptedCheckout {
    async fn open(&self, request: CheckoutRequest) -> CheckoutOutcome {
        let order_id = request.order_id.clone();
        self.requests.lock().unwrap().push(request);
        match self.mode {
            CheckoutMode::Pay => CheckoutOutcome::Confirmed(PaymentConfirmation {
                razorpay_order_id: order_id,
                razorpay_payment_id: "pay_1".into(),
                razorpay_signature: "sig_1".into(),
            }),
            CheckoutMode::Cancel => CheckoutOutcome::Cancelled,
            CheckoutMode::Fail => CheckoutOutcome::Failed("Card declined".into()),
        }
    }
}
