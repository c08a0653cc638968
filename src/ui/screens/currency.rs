use eframe::egui;
use log::info;

use crate::currency::{CurrencyService, SUPPORTED_CURRENCIES};
use crate::ui::state::{AppState, CurrencyState, Screen};

pub struct CurrencyScreen;

impl CurrencyScreen {
    pub fn show(ctx: &egui::Context, app: &mut AppState, state: &mut CurrencyState) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("← Back to Welcome Screen").clicked() {
                    app.current_screen = Screen::Welcome;
                }
            });
            ui.add_space(10.0);

            ui.heading("Currency Converter");
            ui.add_space(10.0);

            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.label("Amount:");
                    ui.add(egui::TextEdit::singleline(&mut state.amount).desired_width(100.0));

                    ui.label("From:");
                    Self::currency_selector(ui, "from_currency", &mut state.from);

                    if ui.button("⇄").on_hover_text("Swap currencies").clicked() {
                        std::mem::swap(&mut state.from, &mut state.to);
                    }

                    ui.label("To:");
                    Self::currency_selector(ui, "to_currency", &mut state.to);

                    if ui.button("Convert").clicked() {
                        Self::run_convert(app, state);
                    }
                });
            });

            if let Some(conversion) = &state.conversion {
                ui.add_space(8.0);
                ui.group(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{}{:.2} {} = {}{:.2} {}",
                            Self::symbol(&conversion.from_currency),
                            conversion.amount,
                            conversion.from_currency,
                            Self::symbol(&conversion.to_currency),
                            conversion.converted_amount,
                            conversion.to_currency,
                        ))
                        .strong()
                        .size(16.0),
                    );
                    ui.label(format!(
                        "Rate: {:.6}   ({})",
                        conversion.exchange_rate, conversion.conversion_date
                    ));
                });
            }

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Show rates").clicked() {
                    Self::run_rates(app, state);
                }
                if ui.button("Clear cache").clicked() {
                    app.runtime.block_on(app.currency.clear_cache());
                    state.status = "Exchange rate cache cleared".to_string();
                }
            });

            if !state.status.is_empty() {
                ui.add_space(8.0);
                ui.label(&state.status);
            }

            if let Some(snapshot) = &state.rates {
                ui.add_space(10.0);
                ui.label(
                    egui::RichText::new(format!("Rates for 1 {}", snapshot.base)).strong(),
                );
                ui.add_space(4.0);

                let mut codes: Vec<&String> = snapshot.rates.keys().collect();
                codes.sort();

                egui::ScrollArea::vertical()
                    .max_height(ui.available_height())
                    .show(ui, |ui| {
                        egui::Grid::new("rates_table")
                            .num_columns(2)
                            .spacing([24.0, 2.0])
                            .striped(true)
                            .show(ui, |ui| {
                                for code in codes {
                                    if let Some(rate) = snapshot.rates.get(code) {
                                        ui.label(code);
                                        ui.label(format!("{rate:.6}"));
                                        ui.end_row();
                                    }
                                }
                            });
                    });
            }
        });
    }

    fn currency_selector(ui: &mut egui::Ui, id: &str, selected: &mut &'static str) {
        egui::ComboBox::from_id_salt(id)
            .selected_text(*selected)
            .show_ui(ui, |ui| {
                for info in CurrencyService::supported_currencies() {
                    ui.selectable_value(
                        selected,
                        info.code,
                        format!("{} — {}", info.code, info.name),
                    );
                }
            });
    }

    fn symbol(code: &str) -> &'static str {
        SUPPORTED_CURRENCIES
            .iter()
            .find(|info| info.code == code)
            .map(|info| info.symbol)
            .unwrap_or("")
    }

    fn run_convert(app: &AppState, state: &mut CurrencyState) {
        let amount = match state.amount.trim().parse::<f64>() {
            Ok(a) => a,
            Err(_) => {
                state.status = "Amount must be a number".to_string();
                return;
            }
        };

        info!("Converting {} {} to {}", amount, state.from, state.to);
        match app
            .runtime
            .block_on(app.currency.convert(amount, state.from, state.to))
        {
            Ok(conversion) => {
                state.conversion = Some(conversion);
                state.status = String::new();
            }
            Err(e) => state.status = e.to_string(),
        }
    }

    fn run_rates(app: &AppState, state: &mut CurrencyState) {
        match app.runtime.block_on(app.currency.rates_for(state.from)) {
            Ok(snapshot) => {
                state.rates = Some(snapshot);
                state.status = String::new();
            }
            Err(e) => state.status = e.to_string(),
        }
    }
}
