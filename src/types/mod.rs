pub mod error;
pub mod request;
pub mod sector;
pub mod source;

pub use error::{Result, ResultExt, SectorError};
pub use request::{EditRequest, GenerationRequest};
pub use sector::{
    Consulting, ContentCard, Cta, Engagement, Faq, FaqItem, Hero, ItemKey, Keyed, Methodology,
    NumberedItem, PageIndex, SECTION_CARDINALITIES, SectorDocument, SectorPayload, ServiceCard,
    Services, SlugRef, WhyUs,
};
pub use source::{Source, SourceKind, take_chars};
