//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use appraise_app::{
    context::AppContext,
    domain::products::{
        MockProductsService,
        records::{ProductId, ProductRecord},
    },
};

use crate::state::State;

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    Arc::new(State::new(AppContext::new(Arc::new(products))))
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(route),
    )
}

pub(crate) fn make_record(id: i64, name: &str, price: f64, quality: u8) -> ProductRecord {
    ProductRecord {
        id: ProductId::from_i64(id),
        name: name.to_string(),
        price,
        quality,
        created_at: Timestamp::UNIX_EPOCH,
    }
}
