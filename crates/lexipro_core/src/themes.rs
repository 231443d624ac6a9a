//! crates/lexipro_core/src/themes.rs
//!
//! The suggested-topic catalog, ten themes per CEFR level. A user can always
//! type a free-form topic instead; these are only the recommendations the
//! presentation layer offers.

use crate::domain::CefrLevel;

/// Suggested themes for one proficiency level.
pub fn suggested_themes(level: CefrLevel) -> &'static [&'static str] {
    match level {
        CefrLevel::A1 => &[
            "Se présenter",
            "La famille",
            "La maison",
            "La nourriture",
            "Les vêtements",
            "Le temps (météo)",
            "Les loisirs",
            "Le corps humain",
            "Les couleurs",
            "Les nombres",
        ],
        CefrLevel::A2 => &[
            "Les voyages",
            "Le travail",
            "La santé",
            "Les commerces",
            "La ville",
            "Les transports",
            "L'école",
            "Les animaux",
            "Le logement",
            "La météo et les saisons",
        ],
        CefrLevel::B1 => &[
            "L'environnement",
            "L'éducation",
            "Les médias",
            "Le monde du travail",
            "Les relations sociales",
            "La culture et les arts",
            "Le sport",
            "Le tourisme durable",
            "L'histoire",
            "La mode",
        ],
        CefrLevel::B2 => &[
            "Le changement climatique",
            "Les nouvelles technologies",
            "La citoyenneté",
            "La mondialisation",
            "La politique",
            "L'éthique",
            "La justice",
            "L'économie",
            "Le travail de demain",
            "L'intelligence artificielle",
        ],
        CefrLevel::C1 => &[
            "Les nuances linguistiques",
            "La philosophie moderne",
            "Les débats sociétaux complexes",
            "L'épistémologie",
            "Le patrimoine immatériel",
            "Les enjeux géopolitiques",
            "La psychologie sociale",
            "L'urbanisme",
            "Le pluralisme culturel",
            "Les théories esthétiques",
        ],
        CefrLevel::C2 => &[
            "L'abstraction conceptuelle",
            "La critique littéraire",
            "Les paradoxes de la modernité",
            "Le transhumanisme",
            "La sémantique cognitive",
            "L'herméneutique",
            "La sociolinguistique critique",
            "La métaphysique",
            "La dialectique",
            "Les subtilités stylistiques",
        ],
    }
}
