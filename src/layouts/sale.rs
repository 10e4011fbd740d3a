//! Layout of the archived "venda" (for sale) search pages
//!
//! Cards list area, rooms, bathrooms and garage as the first four detail items,
//! in that order. The detail page carries the condominium fee and the
//! breadcrumb with zone and district.

use crate::layouts::{
    document_text, document_texts, first_text, join_list, parse_base_url, resolve_detail,
    retain_chars, selector, ExtractError, Layout, Listing,
};
use crate::record::Record;
use scraper::{Html, Selector};
use url::Url;

const DETAIL_FIELDS: &[&str] = &["condo", "suite", "zone", "district", "characteristics"];

/// Breadcrumb positions of zone and district on the detail page
const ZONE_CRUMB: usize = 4;
const DISTRICT_CRUMB: usize = 5;

#[derive(Debug)]
pub struct SaleLayout {
    detail_base: Url,
    card: Selector,
    title_image: Selector,
    address: Selector,
    detail_item: Selector,
    detail_value: Selector,
    price: Selector,
    main_link: Selector,
    condo: Selector,
    suite: Selector,
    breadcrumb: Selector,
    amenity: Selector,
}

impl SaleLayout {
    pub fn new(detail_base_url: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            detail_base: parse_base_url(detail_base_url)?,
            card: selector(".property-card__container")?,
            title_image: selector(
                ".property-card__carousel .carousel__item-wrapper:first-child img",
            )?,
            address: selector(".property-card__address")?,
            detail_item: selector("ul.property-card__details .property-card__detail-item")?,
            detail_value: selector(".js-property-card-value")?,
            price: selector(".property-card__price")?,
            main_link: selector("a.property-card__main-link")?,
            condo: selector("span.price__list-value.condominium")?,
            suite: selector("small")?,
            breadcrumb: selector(".breadcrumb__item-name")?,
            amenity: selector("ul.amenities__list li")?,
        })
    }
}

/// Drops the currency symbol and all whitespace from a price
fn clean_price(raw: &str) -> String {
    retain_chars(&raw.replace("R$", ""), |c| !c.is_whitespace())
}

impl Layout for SaleLayout {
    fn name(&self) -> &'static str {
        "sale"
    }

    fn listings(&self, document: &Html, page_url: &str) -> Result<Vec<Listing>, ExtractError> {
        let listings = document
            .select(&self.card)
            .map(|card| {
                let details: Vec<_> = card.select(&self.detail_item).collect();
                let detail_value =
                    |index: usize| details.get(index).and_then(|item| first_text(*item, &self.detail_value));

                let record = Record::new()
                    .with("link", Some(page_url.to_string()))
                    .with(
                        "title",
                        card.select(&self.title_image)
                            .next()
                            .and_then(|img| img.value().attr("alt"))
                            .map(str::to_string),
                    )
                    .with("address", first_text(card, &self.address))
                    .with("area", detail_value(0))
                    .with("rooms", detail_value(1))
                    .with("bathrooms", detail_value(2))
                    .with("garage", detail_value(3))
                    .with(
                        "price",
                        first_text(card, &self.price).map(|raw| clean_price(&raw)),
                    );

                let href = card
                    .select(&self.main_link)
                    .next()
                    .and_then(|link| link.value().attr("href"));

                Listing {
                    record,
                    detail_url: resolve_detail(&self.detail_base, href),
                }
            })
            .collect();

        Ok(listings)
    }

    fn details(&self, document: &Html) -> Record {
        let crumbs = document_texts(document, &self.breadcrumb);

        Record::new()
            .with(
                "condo",
                document_text(document, &self.condo).map(|raw| clean_price(&raw)),
            )
            .with("suite", document_text(document, &self.suite))
            .with("zone", crumbs.get(ZONE_CRUMB).cloned())
            .with("district", crumbs.get(DISTRICT_CRUMB).cloned())
            .with(
                "characteristics",
                join_list(document_texts(document, &self.amenity)),
            )
    }

    fn detail_fields(&self) -> &'static [&'static str] {
        DETAIL_FIELDS
    }
}
