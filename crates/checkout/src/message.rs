//! Order message formatting and the WhatsApp deep link.
//!
//! The message is plain WhatsApp-flavored text (`*bold*`). Its layout is fixed
//! so the store can read every order the same way: missing contact or address
//! fields show as `-` instead of disappearing.

use monster_burger_core::Price;

use crate::cart::CartSnapshot;
use crate::form::{CustomerInfo, DeliveryAddress, PaymentSelection};

/// Store number receiving orders (country code + area code + number).
pub const DEFAULT_RECIPIENT: &str = "5564999663524";

/// Base URL of the WhatsApp click-to-chat endpoint.
pub const DEFAULT_MESSAGING_BASE_URL: &str = "https://wa.me";

const PLACEHOLDER: &str = "-";

/// Where orders are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagingTarget {
    /// Click-to-chat base URL, without a trailing slash.
    pub base_url: String,
    /// Recipient phone number, digits only.
    pub recipient: String,
}

impl Default for MessagingTarget {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MESSAGING_BASE_URL.to_string(),
            recipient: DEFAULT_RECIPIENT.to_string(),
        }
    }
}

impl MessagingTarget {
    /// Deep link opening a chat with the recipient, pre-filled with `text`.
    #[must_use]
    pub fn link(&self, text: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.base_url.trim_end_matches('/'),
            self.recipient,
            urlencoding::encode(text)
        )
    }
}

/// Everything the message is built from.
#[derive(Debug, Clone, Copy)]
pub struct OrderDetails<'a> {
    /// Items and amounts.
    pub cart: &'a CartSnapshot,
    /// Order-level note; blank notes are left out.
    pub order_note: Option<&'a str>,
    /// Contact block.
    pub customer: &'a CustomerInfo,
    /// Delivery block.
    pub address: &'a DeliveryAddress,
    /// Payment block.
    pub payment: &'a PaymentSelection,
    /// Whether the delivery block has a CEP line. Checkouts without an
    /// address book use the older layout without it.
    pub include_postal_code: bool,
}

fn or_placeholder(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        PLACEHOLDER
    } else {
        trimmed
    }
}

/// Build the order message.
#[must_use]
pub fn build_order_message(order: &OrderDetails<'_>) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("🧾 *Pedido - Finalizar*".to_string());
    lines.push(String::new());

    // Items
    lines.push("*Resumo*".to_string());
    for item in &order.cart.items {
        lines.push(format!(
            "• {}x {} — {}",
            item.quantity,
            item.name,
            item.line_total()
        ));
        if let Some(subtitle) = item.subtitle.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("  {subtitle}"));
        }
        if let Some(note) = item.note.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("  {note}"));
        }
    }

    // Amounts
    let fee = if order.cart.is_empty() {
        Price::ZERO
    } else {
        order.cart.delivery_fee
    };
    lines.push(String::new());
    lines.push(format!("Subtotal: {}", order.cart.subtotal));
    lines.push(format!("Entrega: {fee}"));
    lines.push(format!("*Total: {}*", order.cart.total));

    if let Some(note) = order.order_note.map(str::trim).filter(|n| !n.is_empty()) {
        lines.push(String::new());
        lines.push(format!("Obs: {note}"));
    }

    // Contact
    lines.push(String::new());
    lines.push("*Seus Dados*".to_string());
    lines.push(format!("Nome: {}", or_placeholder(&order.customer.full_name)));
    lines.push(format!("WhatsApp: {}", or_placeholder(&order.customer.phone)));

    // Delivery
    let address = order.address;
    lines.push(String::new());
    lines.push("*Entrega*".to_string());
    if order.include_postal_code {
        lines.push(format!("CEP: {}", or_placeholder(&address.postal_code)));
    }
    lines.push(format!(
        "Rua: {}, Nº: {}",
        or_placeholder(&address.street),
        or_placeholder(&address.number)
    ));
    lines.push(format!("Bairro: {}", or_placeholder(&address.district)));
    let complement = address.complement.trim();
    if !complement.is_empty() {
        lines.push(format!("Compl.: {complement}"));
    }

    // Payment
    lines.push(String::new());
    lines.push("*Pagamento*".to_string());
    lines.push(match order.payment.cash_change() {
        Some(change) => format!("{} (troco para: {change})", order.payment.method.label()),
        None => order.payment.method.label().to_string(),
    });

    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use monster_burger_core::{ItemId, PaymentMethod};

    use super::*;
    use crate::cart::{Cart, LineItem};

    fn customer() -> CustomerInfo {
        CustomerInfo {
            full_name: "Ana Souza".to_string(),
            phone: "(64) 99966-3524".to_string(),
        }
    }

    fn address() -> DeliveryAddress {
        DeliveryAddress {
            postal_code: "75800-000".to_string(),
            street: "Rua das Flores".to_string(),
            number: "12".to_string(),
            district: "Centro".to_string(),
            complement: String::new(),
        }
    }

    fn single_item_cart() -> CartSnapshot {
        Cart::with_items(
            Price::from_reais(5),
            [LineItem::new(ItemId::new(1), "X", Price::from_reais(10), 2)],
        )
        .snapshot()
    }

    fn details<'a>(
        cart: &'a CartSnapshot,
        customer: &'a CustomerInfo,
        address: &'a DeliveryAddress,
        payment: &'a PaymentSelection,
    ) -> OrderDetails<'a> {
        OrderDetails {
            cart,
            order_note: None,
            customer,
            address,
            payment,
            include_postal_code: true,
        }
    }

    #[test]
    fn test_item_line() {
        let cart = single_item_cart();
        let (c, a, p) = (customer(), address(), PaymentSelection::default());
        let message = build_order_message(&details(&cart, &c, &a, &p));
        assert!(message.lines().any(|l| l == "• 2x X — R$\u{a0}20,00"));
    }

    #[test]
    fn test_full_layout() {
        let cart = Cart::with_items(
            Price::from_reais(5),
            [
                LineItem::new(ItemId::new(1), "Monster Burger", Price::from_reais(32), 1)
                    .with_subtitle("+ Bacon Extra")
                    .with_note("Ponto: Ao ponto"),
                LineItem::new(ItemId::new(3), "Coca-Cola Lata", Price::from_reais(6), 2),
            ],
        )
        .snapshot();
        let mut a = address();
        a.complement = "Apto 3".to_string();
        let (c, p) = (customer(), PaymentSelection::cash("50,00"));
        let mut order = details(&cart, &c, &a, &p);
        order.order_note = Some("  sem cebola ");

        let expected = [
            "🧾 *Pedido - Finalizar*",
            "",
            "*Resumo*",
            "• 1x Monster Burger — R$\u{a0}32,00",
            "  + Bacon Extra",
            "  Ponto: Ao ponto",
            "• 2x Coca-Cola Lata — R$\u{a0}12,00",
            "",
            "Subtotal: R$\u{a0}44,00",
            "Entrega: R$\u{a0}5,00",
            "*Total: R$\u{a0}49,00*",
            "",
            "Obs: sem cebola",
            "",
            "*Seus Dados*",
            "Nome: Ana Souza",
            "WhatsApp: (64) 99966-3524",
            "",
            "*Entrega*",
            "CEP: 75800-000",
            "Rua: Rua das Flores, Nº: 12",
            "Bairro: Centro",
            "Compl.: Apto 3",
            "",
            "*Pagamento*",
            "Dinheiro (troco para: 50,00)",
        ]
        .join("\n");

        assert_eq!(build_order_message(&order), expected);
    }

    #[test]
    fn test_missing_fields_render_placeholder() {
        let cart = single_item_cart();
        let (c, a, p) = (
            CustomerInfo::default(),
            DeliveryAddress::default(),
            PaymentSelection::default(),
        );
        let message = build_order_message(&details(&cart, &c, &a, &p));
        assert!(message.contains("Nome: -\n"));
        assert!(message.contains("WhatsApp: -\n"));
        assert!(message.contains("CEP: -\n"));
        assert!(message.contains("Rua: -, Nº: -\n"));
        assert!(message.contains("Bairro: -\n"));
        assert!(!message.contains("Compl."));
        assert!(!message.contains("Obs:"));
    }

    #[test]
    fn test_blank_fields_are_trimmed_to_placeholder() {
        let cart = single_item_cart();
        let c = CustomerInfo {
            full_name: "   ".to_string(),
            phone: String::new(),
        };
        let mut a = address();
        a.street = "  Rua das Flores ".to_string();
        let p = PaymentSelection::default();

        let message = build_order_message(&details(&cart, &c, &a, &p));
        assert!(message.contains("Nome: -\n"));
        assert!(message.contains("Rua: Rua das Flores, Nº: 12\n"));
    }

    #[test]
    fn test_layout_without_postal_code() {
        let cart = single_item_cart();
        let (c, a, p) = (customer(), address(), PaymentSelection::default());
        let mut order = details(&cart, &c, &a, &p);
        order.include_postal_code = false;
        let message = build_order_message(&order);
        assert!(!message.contains("CEP:"));
        assert!(message.contains("*Entrega*\nRua: Rua das Flores, Nº: 12"));
    }

    #[test]
    fn test_payment_wording() {
        let cart = single_item_cart();
        let (c, a) = (customer(), address());
        let last_line = |payment: PaymentSelection| {
            build_order_message(&details(&cart, &c, &a, &payment))
                .lines()
                .last()
                .unwrap()
                .to_string()
        };

        assert_eq!(last_line(PaymentSelection::new(PaymentMethod::Pix)), "Pix");
        assert_eq!(
            last_line(PaymentSelection::new(PaymentMethod::Card)),
            "Cartão (crédito/débito)"
        );
        assert_eq!(last_line(PaymentSelection::cash("")), "Dinheiro");

        let mut card_with_stale_change = PaymentSelection::cash("50");
        card_with_stale_change.method = PaymentMethod::Card;
        assert_eq!(last_line(card_with_stale_change), "Cartão (crédito/débito)");
    }

    #[test]
    fn test_empty_cart_shows_zero_fee() {
        let cart = CartSnapshot {
            items: Vec::new(),
            subtotal: Price::ZERO,
            delivery_fee: Price::from_reais(5),
            total: Price::ZERO,
        };
        let (c, a, p) = (customer(), address(), PaymentSelection::default());
        let message = build_order_message(&details(&cart, &c, &a, &p));
        assert!(message.contains("Entrega: R$\u{a0}0,00"));
    }

    #[test]
    fn test_link_encodes_whole_message() {
        let target = MessagingTarget::default();
        let link = target.link("*Total: R$ 20,00*\nObs: a&b");
        assert_eq!(
            link,
            "https://wa.me/5564999663524?text=%2ATotal%3A%20R%24%2020%2C00%2A%0AObs%3A%20a%26b"
        );
    }

    #[test]
    fn test_link_trims_trailing_slash() {
        let target = MessagingTarget {
            base_url: "https://wa.me/".to_string(),
            recipient: "5511999999999".to_string(),
        };
        assert!(target.link("oi").starts_with("https://wa.me/5511999999999?text=oi"));
    }
}
