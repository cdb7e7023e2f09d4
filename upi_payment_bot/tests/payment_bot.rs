use upg_common::Paise;
use upi_payment_bot::{
    bot::{ALREADY_VERIFIED, CHECK_FAILED, NOT_RECEIVED, ORDER_NOT_FOUND, PAYMENT_VERIFIED, UNKNOWN_ACTION},
    BotCommand,
    ChatReply,
    ChatTrigger,
    PayeeConfig,
    PaymentBot,
};
use upi_payment_engine::{
    db_types::{OrderId, OrderStatusType},
    gateway::{GatewayError, GatewayStatus},
    test_utils::prepare_env::{new_test_database, tear_down},
    OrderFlowApi,
    OrderStore,
    SqliteDatabase,
};

mod support;

use support::mocks::MockGateway;

type TestBot = PaymentBot<SqliteDatabase, MockGateway>;

async fn setup(gateway: MockGateway) -> TestBot {
    let db = new_test_database().await;
    let api = OrderFlowApi::new(db, gateway);
    PaymentBot::new(api, PayeeConfig::new("merchant@paytm", "Merchant"), Paise::from_rupees(150))
}

async fn finish(bot: TestBot) {
    tear_down(bot.api().db().clone()).await;
}

fn no_gateway_calls() -> MockGateway {
    let mut gateway = MockGateway::new();
    gateway.expect_query_status().never();
    gateway
}

/// Sends /start and returns the reply and the callback data of its button
async fn start(bot: &TestBot, requester: &str) -> (ChatReply, String) {
    let reply = bot.handle(ChatTrigger::command(requester, BotCommand::Start)).await;
    assert_eq!(reply.messages.len(), 1);
    let data = reply.messages[0].buttons[0].callback_data.clone();
    (reply, data)
}

fn order_id_from(data: &str) -> OrderId {
    OrderId::from(data.strip_prefix("check:").expect("Not a check token"))
}

#[tokio::test]
async fn start_replies_with_a_payment_code() {
    let bot = setup(no_gateway_calls()).await;
    let (reply, data) = start(&bot, "42").await;
    let order_id = order_id_from(&data);
    assert!(order_id.as_str().starts_with("ORDER_42_"));
    assert!(reply.callback_answer.is_none());

    let message = &reply.messages[0];
    assert_eq!(
        message.text,
        format!("Scan this QR to pay ₹150.00 for Order ID: {order_id}\nClick below to verify payment.")
    );
    assert_eq!(message.buttons.len(), 1);
    assert_eq!(message.buttons[0].text, "Check Payment");
    let link = message.payment_code.as_ref().expect("No payment code");
    assert_eq!(
        link.to_uri(),
        format!("upi://pay?pa=merchant%40paytm&pn=Merchant&am=150.00&tn=Order_{order_id}&cu=INR")
    );

    let order = bot.api().db().fetch_order(&order_id).await.unwrap();
    assert_eq!(order.status, OrderStatusType::Pending);
    assert_eq!(order.amount, Paise::from(15_000));
    assert_eq!(order.requester_id, "42");
    finish(bot).await;
}

#[tokio::test]
async fn paid_order_is_verified_once() {
    let mut gateway = MockGateway::new();
    gateway.expect_query_status().times(1).returning(|_| Ok(GatewayStatus::Success));
    let bot = setup(gateway).await;
    let (_, data) = start(&bot, "42").await;
    let order_id = order_id_from(&data);

    let reply = bot.handle(ChatTrigger::callback("42", &data)).await;
    assert_eq!(reply.callback_answer.as_deref(), Some(PAYMENT_VERIFIED));
    assert_eq!(reply.messages[0].text, format!("Payment for Order ID: {order_id} is successful! Amount: ₹150.00"));

    let reply = bot.handle(ChatTrigger::callback("42", &data)).await;
    assert_eq!(reply.callback_answer.as_deref(), Some(ALREADY_VERIFIED));
    assert_eq!(reply.messages[0].text, format!("Payment for Order ID: {order_id} is successful!"));

    let order = bot.api().db().fetch_order(&order_id).await.unwrap();
    assert_eq!(order.status, OrderStatusType::Success);
    finish(bot).await;
}

#[tokio::test]
async fn unpaid_order_offers_another_check() {
    let mut gateway = MockGateway::new();
    gateway.expect_query_status().times(1).returning(|_| Ok(GatewayStatus::Pending));
    let bot = setup(gateway).await;
    let (_, data) = start(&bot, "42").await;
    let order_id = order_id_from(&data);

    let reply = bot.handle(ChatTrigger::callback("42", &data)).await;
    assert_eq!(reply.callback_answer.as_deref(), Some(NOT_RECEIVED));
    assert_eq!(reply.messages[0].text, format!("Payment for Order ID: {order_id} is still pending."));
    assert_eq!(reply.messages[0].buttons[0].callback_data, data);
    finish(bot).await;
}

#[tokio::test]
async fn gateway_failure_is_reported() {
    let mut gateway = MockGateway::new();
    gateway.expect_query_status().times(1).returning(|_| Err(GatewayError::Network("connection refused".into())));
    let bot = setup(gateway).await;
    let (_, data) = start(&bot, "42").await;

    let reply = bot.handle(ChatTrigger::callback("42", &data)).await;
    assert_eq!(reply.callback_answer.as_deref(), Some(CHECK_FAILED));
    assert_eq!(
        reply.messages[0].text,
        "Error verifying payment: Could not reach the payment gateway: connection refused"
    );
    let order = bot.api().db().fetch_order(&order_id_from(&data)).await.unwrap();
    assert_eq!(order.status, OrderStatusType::Pending);
    finish(bot).await;
}

#[tokio::test]
async fn unknown_orders_are_not_found() {
    let bot = setup(no_gateway_calls()).await;
    let reply = bot.handle(ChatTrigger::callback("42", "check:ORDER_42_1700000000")).await;
    assert_eq!(reply.callback_answer.as_deref(), Some(ORDER_NOT_FOUND));
    assert!(reply.messages.is_empty());
    finish(bot).await;
}

#[tokio::test]
async fn orders_of_other_requesters_are_not_found() {
    let bot = setup(no_gateway_calls()).await;
    let (_, data) = start(&bot, "42").await;
    let reply = bot.handle(ChatTrigger::callback("99", &data)).await;
    assert_eq!(reply.callback_answer.as_deref(), Some(ORDER_NOT_FOUND));
    let order = bot.api().db().fetch_order(&order_id_from(&data)).await.unwrap();
    assert_eq!(order.status, OrderStatusType::Pending);
    finish(bot).await;
}

#[tokio::test]
async fn legacy_tokens_keep_the_whole_order_id() {
    let mut gateway = MockGateway::new();
    gateway
        .expect_query_status()
        .withf(|id| id.as_str().starts_with("ORDER_42_"))
        .times(1)
        .returning(|_| Ok(GatewayStatus::Success));
    let bot = setup(gateway).await;
    let (_, data) = start(&bot, "42").await;
    let legacy = format!("check_{}", order_id_from(&data));
    let reply = bot.handle(ChatTrigger::callback("42", &legacy)).await;
    assert_eq!(reply.callback_answer.as_deref(), Some(PAYMENT_VERIFIED));
    finish(bot).await;
}

#[tokio::test]
async fn unknown_callbacks_are_ignored() {
    let bot = setup(no_gateway_calls()).await;
    let reply = bot.handle(ChatTrigger::callback("42", "refund:ORDER_42_1700000000")).await;
    assert_eq!(reply.callback_answer.as_deref(), Some(UNKNOWN_ACTION));
    assert!(reply.messages.is_empty());
    finish(bot).await;
}

#[tokio::test]
async fn list_orders() {
    let bot = setup(no_gateway_calls()).await;
    let reply = bot.handle(ChatTrigger::command("42", BotCommand::Orders)).await;
    assert_eq!(reply.messages[0].text, "You have no orders yet. Send /start to create one.");
    assert!(reply.messages[0].buttons.is_empty());

    let (_, data) = start(&bot, "42").await;
    let order_id = order_id_from(&data);
    let reply = bot.handle(ChatTrigger::command("42", BotCommand::Orders)).await;
    let message = &reply.messages[0];
    assert!(message.text.starts_with("Your orders:\n"));
    assert!(message.text.contains(order_id.as_str()));
    assert!(message.text.contains("₹150.00"));
    assert!(message.text.contains("PENDING"));
    assert_eq!(message.buttons.len(), 1);
    assert_eq!(message.buttons[0].callback_data, data);

    let reply = bot.handle(ChatTrigger::command("99", BotCommand::Orders)).await;
    assert_eq!(reply.messages[0].text, "You have no orders yet. Send /start to create one.");
    finish(bot).await;
}

#[tokio::test]
async fn help() {
    let bot = setup(no_gateway_calls()).await;
    let reply = bot.handle(ChatTrigger::command("42", BotCommand::Help)).await;
    assert!(reply.messages[0].text.contains("/start"));
    assert!(reply.messages[0].text.contains("/orders"));
    finish(bot).await;
}

#[tokio::test]
async fn custom_order_amount() {
    let bot = setup(no_gateway_calls()).await.with_order_amount(Paise::from(9_950));
    let (reply, data) = start(&bot, "7").await;
    assert!(reply.messages[0].text.starts_with("Scan this QR to pay ₹99.50 for Order ID: ORDER_7_"));
    let order = bot.api().db().fetch_order(&order_id_from(&data)).await.unwrap();
    assert_eq!(order.amount, Paise::from(9_950));
    finish(bot).await;
}
