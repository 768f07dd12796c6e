use std::sync::Arc;

use storefront_core::config::LoadOptions;
use storefront_core::{Product, ProductId};

use crate::commands::{load_context, CommandResult, EXIT_NOT_FOUND};
use crate::view;

pub fn products(options: &LoadOptions, json: bool) -> CommandResult {
    let (config, catalog) = match load_context("products", options) {
        Ok(context) => context,
        Err(failure) => return failure,
    };

    if json {
        return render_json("products", catalog.get_all());
    }
    CommandResult::text(view::product_list(catalog.get_all(), 0, &config.catalog.currency))
}

pub fn search(options: &LoadOptions, query: Option<&str>, json: bool) -> CommandResult {
    let (config, catalog) = match load_context("search", options) {
        Ok(context) => context,
        Err(failure) => return failure,
    };

    let results = catalog.search(query);
    tracing::debug!(
        event_name = "catalog.search",
        query = query.unwrap_or_default(),
        result_count = results.len(),
        "catalog searched"
    );

    if json {
        return render_json("search", &results);
    }
    CommandResult::text(view::search_results(query, &results, &config.catalog.currency))
}

pub fn show(options: &LoadOptions, id: u32) -> CommandResult {
    let (config, catalog) = match load_context("show", options) {
        Ok(context) => context,
        Err(failure) => return failure,
    };

    match catalog.get_by_id(ProductId(id)) {
        Some(product) => {
            CommandResult::text(view::product_detail(product, false, &config.catalog.currency))
        }
        None => CommandResult::failure(
            "show",
            "not_found",
            format!("product {id} was not found in the catalog"),
            EXIT_NOT_FOUND,
        ),
    }
}

fn render_json(command: &str, products: &[Arc<Product>]) -> CommandResult {
    match serde_json::to_string_pretty(products) {
        Ok(output) => CommandResult::text(output),
        Err(error) => CommandResult::failure(command, "serialization", error.to_string(), 1),
    }
}
