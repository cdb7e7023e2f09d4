//! A line-oriented chat transport on stdin/stdout.
//!
//! Lines starting with `/` are commands. Anything else is treated as a button press, so a requester can copy the
//! `check:<order_id>` token printed under a payment code and paste it back. `quit` or end-of-input stops the loop.
use std::fmt::Write;

use log::*;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use upi_payment_engine::{gateway::PaymentStatusGateway, OrderStore};

use crate::{
    chat::{BotCommand, ChatReply, ChatTrigger},
    payment_code::render_unicode,
    BotError,
    PaymentBot,
};

const PROMPT: &str = "> ";

/// Interprets one line of console input. Returns `None` for blank lines.
pub fn parse_line(requester_id: &str, line: &str) -> Option<Result<ChatTrigger, BotError>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if line.starts_with('/') {
        Some(line.parse::<BotCommand>().map(|cmd| ChatTrigger::command(requester_id, cmd)))
    } else {
        Some(Ok(ChatTrigger::callback(requester_id, line)))
    }
}

/// Renders a reply as plain text, payment codes included.
pub fn format_reply(reply: &ChatReply) -> Result<String, BotError> {
    let mut f = String::new();
    if let Some(answer) = &reply.callback_answer {
        writeln!(f, "[{answer}]")?;
    }
    for message in &reply.messages {
        if let Some(link) = &message.payment_code {
            writeln!(f, "{}", render_unicode(link)?)?;
            writeln!(f, "{link}")?;
        }
        writeln!(f, "{}", message.text)?;
        for button in &message.buttons {
            writeln!(f, "  [{}] -> {}", button.text, button.callback_data)?;
        }
    }
    Ok(f)
}

pub async fn run_console<B, G>(bot: &PaymentBot<B, G>, requester_id: &str) -> Result<(), BotError>
where
    B: OrderStore,
    G: PaymentStatusGateway,
{
    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();
    stdout.write_all(format!("Chatting as requester {requester_id}. Type /help for commands, quit to exit.\n").as_bytes()).await?;
    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }
        let trigger = match parse_line(requester_id, &line) {
            None => continue,
            Some(Ok(trigger)) => trigger,
            Some(Err(e)) => {
                stdout.write_all(format!("{e}\n").as_bytes()).await?;
                continue;
            },
        };
        trace!("💬️ {trigger:?}");
        let reply = bot.handle(trigger).await;
        stdout.write_all(format_reply(&reply)?.as_bytes()).await?;
    }
    info!("💬️ Console session for requester {requester_id} ended");
    Ok(())
}

#[cfg(test)]
mod test {
    use upg_common::Paise;
    use upi_payment_engine::{db_types::OrderId, helpers::UpiPaymentLink};

    use super::*;
    use crate::chat::{ChatMessage, InlineButton};

    #[test]
    fn console_lines() {
        assert!(parse_line("42", "   ").is_none());
        let trigger = parse_line("42", "/start\n").unwrap().unwrap();
        assert_eq!(trigger, ChatTrigger::command("42", BotCommand::Start));
        let trigger = parse_line("42", " check:ORDER_42_1700000000 ").unwrap().unwrap();
        assert_eq!(trigger, ChatTrigger::callback("42", "check:ORDER_42_1700000000"));
        assert!(matches!(parse_line("42", "/pay"), Some(Err(BotError::UnknownCommand(_)))));
    }

    #[test]
    fn text_replies() {
        let reply = ChatReply::answer_with_message(
            "Payment not received yet.",
            ChatMessage::text("Payment for Order ID: ORDER_42_1 is still pending.")
                .with_button(InlineButton::new("Check Payment", "check:ORDER_42_1".into())),
        );
        let text = format_reply(&reply).unwrap();
        assert_eq!(
            text,
            "[Payment not received yet.]\nPayment for Order ID: ORDER_42_1 is still pending.\n  [Check Payment] -> \
             check:ORDER_42_1\n"
        );
    }

    #[test]
    fn replies_with_payment_codes() {
        let link = UpiPaymentLink::for_order("merchant@paytm", "Merchant", &OrderId::from("ORDER_42_1"), Paise::from(15_000));
        let reply = ChatReply::message(ChatMessage::text("Scan this QR").with_payment_code(link.clone()));
        let text = format_reply(&reply).unwrap();
        assert!(text.contains(&link.to_uri()));
        assert!(text.ends_with("Scan this QR\n"));
        assert!(text.lines().count() > 10);
    }
}
