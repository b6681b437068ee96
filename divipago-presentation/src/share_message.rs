use chrono::{Datelike, NaiveDate};
use divipago_domain::{Expense, Money, SettlementEngine};

use crate::currency::CurrencyFormatter;

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Builds the plain-text summary of an expense for sharing over a messaging
/// app: totals, per-person balances, suggested settlement payments, and the
/// line-item detail.
pub struct SharePresenter;

impl SharePresenter {
    pub fn render(expense: &Expense, formatter: &CurrencyFormatter) -> String {
        let mut lines = vec![
            format!("📋 *{}*", expense.title),
            format!("📅 Fecha: {}", format_date_es(expense.date)),
            format!("💶 Total: {}", formatter.format(expense.total())),
        ];
        if !expense.participants.is_empty() {
            let per_person = expense.total().split(expense.participants.len());
            lines.push(format!("👥 Por persona: {}", formatter.format(per_person)));
        }
        lines.push(String::new());
        lines.push("💫 *Balances:*".to_owned());

        let sheet = SettlementEngine::balances(expense);
        for participant in &expense.participants {
            let net = sheet
                .get(&participant.id)
                .map(|balance| balance.net())
                .unwrap_or(Money::ZERO)
                .round_display();
            let line = if net > Money::ZERO {
                format!("• {} debe {}", participant.name, formatter.format(net))
            } else if net < Money::ZERO {
                format!(
                    "• {} debe recibir {}",
                    participant.name,
                    formatter.format(net.abs())
                )
            } else {
                format!("• {} está al día", participant.name)
            };
            lines.push(line);
        }

        let payments = SettlementEngine::settlement(expense);
        if !payments.is_empty() {
            lines.push(String::new());
            lines.push("🤝 *Pagos sugeridos:*".to_owned());
            for payment in &payments {
                let from = expense.participant_name(payment.from).unwrap_or("?");
                let to = expense.participant_name(payment.to).unwrap_or("?");
                lines.push(format!(
                    "• {from} le paga {} a {to}",
                    formatter.format(payment.amount)
                ));
            }
        }

        lines.push(String::new());
        lines.push("🧾 *Detalle de gastos:*".to_owned());
        for item in &expense.items {
            let payer = item
                .payer
                .and_then(|id| expense.participant_name(id));
            let mut line = format!(
                "• {}: {}",
                item.description,
                formatter.format(item.amount)
            );
            if let Some(name) = payer {
                line.push_str(&format!(" (pagado por {name})"));
            }
            lines.push(line);
        }

        lines.push(String::new());
        lines.push("✨ Generado con Divipago".to_owned());
        lines.join("\n")
    }
}

fn format_date_es(date: NaiveDate) -> String {
    let month = MONTHS_ES[date.month0() as usize];
    format!("{} de {month} de {}", date.day(), date.year())
}
