use eframe::egui;
use egui_extras::{Column, TableBuilder};
use log::info;

use crate::models::{NewProduct, ProductQuery, SortColumn, SortOrder};
use crate::repository;
use crate::ui::{
    components::StatusBar,
    state::{AppState, EditForm, ProductsState, Screen},
};

pub struct ProductsScreen;

impl ProductsScreen {
    pub fn show(ctx: &egui::Context, app: &mut AppState, state: &mut ProductsState) {
        if state.listing.is_none() {
            Self::reload(app, state);
        }

        StatusBar::show(ctx, &mut app.store);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("← Back to Welcome Screen").clicked() {
                    app.current_screen = Screen::Welcome;
                }
            });
            ui.add_space(10.0);

            ui.heading("Products");
            ui.add_space(10.0);

            Self::show_create_form(ui, app, state);
            ui.add_space(10.0);

            Self::show_listing_controls(ui, state);
            ui.separator();

            Self::show_table(ui, app, state);
            ui.add_space(8.0);

            Self::show_pagination(ui, state);

            if !state.status.is_empty() {
                ui.add_space(8.0);
                ui.label(&state.status);
            }
        });
    }

    /// Fetches the page described by the current controls. A page left empty
    /// by a delete steps back one page instead of showing nothing.
    fn reload(app: &AppState, state: &mut ProductsState) {
        let conn = match app.store.conn() {
            Ok(conn) => conn,
            Err(msg) => {
                state.status = msg;
                return;
            }
        };

        let query = ProductQuery {
            page: state.page,
            page_size: state.page_size,
            search: if state.search.trim().is_empty() {
                None
            } else {
                Some(state.search.clone())
            },
            sort: state.sort,
            order: state.order,
        };

        match repository::list_products(conn, &query) {
            Ok(page) => {
                if page.products.is_empty() && page.page > 1 {
                    state.page = page.page - 1;
                    state.listing = None;
                } else {
                    state.listing = Some(page);
                }
            }
            Err(e) => state.status = format!("Failed to load products: {e}"),
        }
    }

    fn show_create_form(ui: &mut egui::Ui, app: &mut AppState, state: &mut ProductsState) {
        egui::CollapsingHeader::new("Add Product").show(ui, |ui| {
            egui::Grid::new("create_form")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.text_edit_singleline(&mut state.form.name);
                    ui.end_row();

                    ui.label("Price:");
                    ui.text_edit_singleline(&mut state.form.price);
                    ui.end_row();

                    ui.label("Category:");
                    ui.text_edit_singleline(&mut state.form.category);
                    ui.end_row();

                    ui.label("Stock:");
                    ui.text_edit_singleline(&mut state.form.stock);
                    ui.end_row();

                    ui.label("Description:");
                    ui.text_edit_singleline(&mut state.form.description);
                    ui.end_row();

                    ui.label("Image URL:");
                    ui.text_edit_singleline(&mut state.form.image_url);
                    ui.end_row();
                });

            if ui.button("Create").clicked() {
                Self::create_from_form(app, state);
            }
        });
    }

    fn create_from_form(app: &AppState, state: &mut ProductsState) {
        let conn = match app.store.conn() {
            Ok(conn) => conn,
            Err(msg) => {
                state.status = msg;
                return;
            }
        };

        if state.form.name.trim().is_empty() {
            state.status = "Name is required".to_string();
            return;
        }
        let price = match state.form.price.trim().parse::<f64>() {
            Ok(p) if p >= 0.0 => p,
            _ => {
                state.status = "Price must be a non-negative number".to_string();
                return;
            }
        };
        let stock = if state.form.stock.trim().is_empty() {
            0
        } else {
            match state.form.stock.trim().parse::<i64>() {
                Ok(s) if s >= 0 => s,
                _ => {
                    state.status = "Stock must be a non-negative whole number".to_string();
                    return;
                }
            }
        };

        let new = NewProduct {
            name: state.form.name.clone(),
            price,
            category: state.form.category.clone(),
            stock,
            description: state.form.description.clone(),
            image_url: state.form.image_url.clone(),
        };

        match repository::create_product(conn, &new) {
            Ok(product) => {
                info!("Created product {} ({})", product.id, product.name);
                state.status = format!("Created \"{}\"", product.name);
                state.form = Default::default();
                state.listing = None;
            }
            Err(e) => state.status = format!("Failed to create product: {e}"),
        }
    }

    fn show_listing_controls(ui: &mut egui::Ui, state: &mut ProductsState) {
        ui.horizontal(|ui| {
            ui.label("Search:");
            let response = ui.text_edit_singleline(&mut state.search);
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                state.page = 1;
                state.listing = None;
            }
            if ui.button("Filter").clicked() {
                state.page = 1;
                state.listing = None;
            }

            ui.separator();

            ui.label("Sort by:");
            egui::ComboBox::from_id_salt("sort_column")
                .selected_text(state.sort.label())
                .show_ui(ui, |ui| {
                    for &column in SortColumn::all() {
                        if ui
                            .selectable_value(&mut state.sort, column, column.label())
                            .clicked()
                        {
                            state.listing = None;
                        }
                    }
                });
            egui::ComboBox::from_id_salt("sort_order")
                .selected_text(state.order.label())
                .show_ui(ui, |ui| {
                    for order in [SortOrder::Asc, SortOrder::Desc] {
                        if ui
                            .selectable_value(&mut state.order, order, order.label())
                            .clicked()
                        {
                            state.listing = None;
                        }
                    }
                });

            ui.separator();

            ui.label("Per page:");
            egui::ComboBox::from_id_salt("page_size")
                .selected_text(state.page_size.to_string())
                .show_ui(ui, |ui| {
                    for size in [10, 25, 50] {
                        if ui
                            .selectable_value(&mut state.page_size, size, size.to_string())
                            .clicked()
                        {
                            state.page = 1;
                            state.listing = None;
                        }
                    }
                });
        });
    }

    fn show_table(ui: &mut egui::Ui, app: &mut AppState, state: &mut ProductsState) {
        let Some(listing) = state.listing.clone() else {
            ui.label("Loading products...");
            return;
        };
        if listing.products.is_empty() {
            ui.label("No products found.");
            return;
        }

        // Row actions are collected during the render and applied afterwards.
        let mut delete_id: Option<i64> = None;
        let mut save_edit: Option<EditForm> = None;

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto()) // select
            .column(Column::auto()) // id
            .column(Column::remainder().at_least(140.0)) // name
            .column(Column::auto().at_least(70.0)) // price
            .column(Column::auto().at_least(90.0)) // category
            .column(Column::auto()) // stock
            .column(Column::auto().at_least(120.0)) // created
            .column(Column::auto().at_least(130.0)) // actions
            .header(20.0, |mut header| {
                header.col(|_| {});
                for label in ["ID", "Name", "Price", "Category", "Stock", "Created", ""] {
                    header.col(|ui| {
                        ui.strong(label);
                    });
                }
            })
            .body(|mut body| {
                for product in &listing.products {
                    let editing = state.edit.as_ref().map(|e| e.id) == Some(product.id);
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            let mut checked = app.selected_ids.contains(&product.id);
                            if ui.checkbox(&mut checked, "").changed() {
                                if checked {
                                    app.selected_ids.insert(product.id);
                                } else {
                                    app.selected_ids.remove(&product.id);
                                }
                            }
                        });
                        row.col(|ui| {
                            ui.label(product.id.to_string());
                        });
                        row.col(|ui| {
                            if editing {
                                if let Some(edit) = state.edit.as_mut() {
                                    ui.text_edit_singleline(&mut edit.name);
                                }
                            } else {
                                ui.label(&product.name);
                            }
                        });
                        row.col(|ui| {
                            if editing {
                                if let Some(edit) = state.edit.as_mut() {
                                    ui.text_edit_singleline(&mut edit.price);
                                }
                            } else {
                                ui.label(format!("{:.2}", product.price));
                            }
                        });
                        row.col(|ui| {
                            ui.label(product.category.as_deref().unwrap_or("—"));
                        });
                        row.col(|ui| {
                            ui.label(product.stock.to_string());
                        });
                        row.col(|ui| {
                            ui.label(&product.created_at);
                        });
                        row.col(|ui| {
                            if editing {
                                if ui.button("Save").clicked() {
                                    save_edit = state.edit.clone();
                                }
                                if ui.button("Cancel").clicked() {
                                    state.edit = None;
                                }
                            } else {
                                if ui.button("Edit").clicked() {
                                    state.edit = Some(EditForm {
                                        id: product.id,
                                        name: product.name.clone(),
                                        price: format!("{:.2}", product.price),
                                    });
                                }
                                if ui.button("Delete").clicked() {
                                    delete_id = Some(product.id);
                                }
                            }
                        });
                    });
                }
            });

        if let Some(edit) = save_edit {
            Self::apply_edit(app, state, &edit);
        }
        if let Some(id) = delete_id {
            Self::apply_delete(app, state, id);
        }
    }

    fn apply_edit(app: &AppState, state: &mut ProductsState, edit: &EditForm) {
        let conn = match app.store.conn() {
            Ok(conn) => conn,
            Err(msg) => {
                state.status = msg;
                return;
            }
        };

        if edit.name.trim().is_empty() {
            state.status = "Name is required".to_string();
            return;
        }
        let price = match edit.price.trim().parse::<f64>() {
            Ok(p) if p >= 0.0 => p,
            _ => {
                state.status = "Price must be a non-negative number".to_string();
                return;
            }
        };

        match repository::update_product(conn, edit.id, &edit.name, price) {
            Ok(product) => {
                state.status = format!("Updated \"{}\"", product.name);
                state.edit = None;
                state.listing = None;
            }
            Err(e) => state.status = format!("Failed to update product: {e}"),
        }
    }

    fn apply_delete(app: &mut AppState, state: &mut ProductsState, id: i64) {
        let conn = match app.store.conn() {
            Ok(conn) => conn,
            Err(msg) => {
                state.status = msg;
                return;
            }
        };

        match repository::delete_product(conn, id) {
            Ok(()) => {
                app.selected_ids.remove(&id);
                state.status = format!("Deleted product {id}");
                state.listing = None;
            }
            Err(e) => state.status = format!("Failed to delete product: {e}"),
        }
    }

    fn show_pagination(ui: &mut egui::Ui, state: &mut ProductsState) {
        let (total_pages, total_count) = match &state.listing {
            Some(listing) => (listing.total_pages.max(1), listing.total_count),
            None => return,
        };

        ui.horizontal(|ui| {
            if ui
                .add_enabled(state.page > 1, egui::Button::new("← Prev"))
                .clicked()
            {
                state.page -= 1;
                state.listing = None;
            }
            ui.label(format!(
                "Page {} of {} ({} products)",
                state.page.min(total_pages),
                total_pages,
                total_count
            ));
            if ui
                .add_enabled(state.page < total_pages, egui::Button::new("Next →"))
                .clicked()
            {
                state.page += 1;
                state.listing = None;
            }
        });
    }
}
