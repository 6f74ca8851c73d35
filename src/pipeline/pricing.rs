//! Service price guardrails
//!
//! Prices for the core offerings are business-controlled constants. Whatever
//! the model writes for a recognised service is overwritten; unrecognised
//! services keep their price, or get a placeholder when they have none.

use crate::constants::page::PLACEHOLDER_PRICE;
use crate::types::{SectorPayload, ServiceCard};

/// Service lines with a fixed price range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceOffering {
    ExecutiveAdvisory,
    CapabilityWorkshops,
    RapidPrototyping,
    MultiModelOrchestration,
    EthicsEvaluationEngine,
}

impl ServiceOffering {
    pub const ALL: [ServiceOffering; 5] = [
        ServiceOffering::ExecutiveAdvisory,
        ServiceOffering::CapabilityWorkshops,
        ServiceOffering::RapidPrototyping,
        ServiceOffering::MultiModelOrchestration,
        ServiceOffering::EthicsEvaluationEngine,
    ];

    /// Lowercase title the offering is recognised by
    pub fn canonical_name(self) -> &'static str {
        match self {
            ServiceOffering::ExecutiveAdvisory => "executive advisory",
            ServiceOffering::CapabilityWorkshops => "capability workshops",
            ServiceOffering::RapidPrototyping => "rapid prototyping",
            ServiceOffering::MultiModelOrchestration => "multi-model orchestration",
            ServiceOffering::EthicsEvaluationEngine => "ethics & evaluation engine",
        }
    }

    pub fn price_range(self) -> &'static str {
        match self {
            ServiceOffering::ExecutiveAdvisory => "$5-15K",
            ServiceOffering::CapabilityWorkshops => "$15-75K",
            ServiceOffering::RapidPrototyping => "$30-150K",
            ServiceOffering::MultiModelOrchestration => "$100-250K",
            ServiceOffering::EthicsEvaluationEngine => "$50-150K",
        }
    }

    /// Match a card title, ignoring case and surrounding whitespace
    pub fn from_title(title: &str) -> Option<Self> {
        let normalized = title.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|offering| offering.canonical_name() == normalized)
    }
}

/// Apply the guardrail to a single card
pub fn guard_price(mut card: ServiceCard) -> ServiceCard {
    match ServiceOffering::from_title(&card.title) {
        Some(offering) => card.price = Some(offering.price_range().to_string()),
        None if card.price.as_deref().is_none_or(str::is_empty) => {
            card.price = Some(PLACEHOLDER_PRICE.to_string());
        }
        None => {}
    }
    card
}

/// Apply the guardrail to every services card
pub fn apply_price_guardrails(mut payload: SectorPayload) -> SectorPayload {
    payload.services.cards = payload
        .services
        .cards
        .into_iter()
        .map(guard_price)
        .collect();
    payload
}
