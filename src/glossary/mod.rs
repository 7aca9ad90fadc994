/*!
 * Static source-phrase to target-phrase glossary.
 *
 * A `Glossary` is an ordered list of entries built once at startup and
 * passed explicitly to the `TermMatcher`. Construction follows dictionary
 * semantics: a repeated source phrase keeps the position of its first
 * definition and takes the target of its last one.
 */

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::GlossaryError;

pub mod matcher;

pub use self::matcher::TermMatcher;

/// One source phrase and its replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    /// Phrase to look for (never empty)
    pub source: String,

    /// Phrase to substitute
    pub target: String,
}

impl GlossaryEntry {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// Ordered, read-only collection of glossary entries
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    entries: Vec<GlossaryEntry>,
    index: HashMap<String, usize>,
}

impl Glossary {
    /// Create an empty glossary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a glossary from (source, target) pairs.
    ///
    /// Fails on the first empty source phrase.
    pub fn from_pairs<I, S, T>(pairs: I) -> Result<Self, GlossaryError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut glossary = Self::new();
        for (index, (source, target)) in pairs.into_iter().enumerate() {
            let source = source.into();
            if source.is_empty() {
                return Err(GlossaryError::EmptySource { index });
            }
            glossary.upsert(source, target.into());
        }
        Ok(glossary)
    }

    /// Build a glossary from already-deserialized entries.
    pub fn from_entries(entries: Vec<GlossaryEntry>) -> Result<Self, GlossaryError> {
        Self::from_pairs(entries.into_iter().map(|e| (e.source, e.target)))
    }

    /// Load a glossary from a JSON file holding an array of
    /// `{"source": ..., "target": ...}` objects.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, GlossaryError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| GlossaryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<GlossaryEntry> =
            serde_json::from_str(&raw).map_err(|source| GlossaryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_entries(entries)
    }

    /// The glossary shipped with the tool for the book being localized.
    pub fn builtin() -> Self {
        let mut glossary = Self::new();
        for (source, target) in BUILTIN_ENTRIES {
            glossary.upsert((*source).to_string(), (*target).to_string());
        }
        glossary
    }

    fn upsert(&mut self, source: String, target: String) {
        match self.index.get(&source) {
            Some(&position) => self.entries[position].target = target,
            None => {
                self.index.insert(source.clone(), self.entries.len());
                self.entries.push(GlossaryEntry { source, target });
            }
        }
    }

    /// Entries in definition order.
    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Repeated keys are intentional: later definitions win.
const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    // Titles and headers
    ("Guns, Germs, and Steel", "Arme, Germeni și Oțel"),
    ("The Fates of Human Societies", "Soarta Societăților Umane"),
    ("Jared Diamond", "Jared Diamond"),
    // Part titles and chapter structure
    ("Part One", "Partea Întâi"),
    ("Part Two", "Partea A Doua"),
    ("Part Three", "Partea A Treia"),
    ("Part Four", "Partea A Patra"),
    ("Chapter", "Capitolul"),
    ("Preface", "Prefață"),
    ("Prologue", "Prologul"),
    ("Epilogue", "Epilogul"),
    ("Conclusion", "Concluzie"),
    ("Introduction", "Introducere"),
    // Key concepts
    ("human societies", "societăți umane"),
    ("technological advancement", "progres tehnologic"),
    ("societal advancement", "progres social"),
    ("natural resources", "resurse naturale"),
    ("environmental factors", "factori ambientali"),
    ("different continents", "continente diferite"),
    ("increased globalization", "globalizare crescândă"),
    ("technological superiority", "superioritate tehnologică"),
    ("inherent differences", "diferențe inerente"),
    ("core premise", "premisă esențială"),
    ("geographical and environmental factors", "factori geografici și ambientali"),
    ("biological or cultural inferiority", "inferioritate biologică sau culturală"),
    ("continental layout", "configurația continentului"),
    ("mechanisms of civilization", "mecanismele civilizației"),
    ("landmark work on", "lucrare de referință despre"),
    ("sets the stage for", "pregătește scenariul pentru"),
    ("central inquiry", "investigația centrală"),
    ("prevailing assumptions", "asumptiile prevalente"),
    ("between populations", "între populații"),
    ("trade networks", "rețele comerciale"),
    ("technology diffusion", "difuzarea tehnologiei"),
    ("disease transmission", "transmisia bolii"),
    ("animal domestication", "domesticirea animalelor"),
    ("plant domestication", "domesticirea plantelor"),
    ("lagged behind", "a rămas în urmă"),
    ("stems from", "provine din"),
    ("the 1990s", "anii 1990"),
    // Technical terms
    ("biogeography", "biogeografie"),
    ("epidemiology", "epidemiologie"),
    ("anthropology", "antropologie"),
    ("archaeology", "arheologie"),
    ("ecology", "ecologie"),
    ("evolution", "evoluție"),
    ("migration", "migrație"),
    ("settlement", "așezare"),
    ("subsistence", "subzistență"),
    ("surplus", "excedent"),
    ("domestication", "domesticire"),
    ("agriculture", "agricultură"),
    ("civilization", "civilizație"),
    ("geography", "geografie"),
    ("technology", "tehnologie"),
    ("innovation", "inovație"),
    ("diffusion", "difuzare"),
    ("advantage", "avantaj"),
    ("resource", "resursă"),
    ("environment", "mediu"),
    ("development", "dezvoltare"),
    ("continent", "continent"),
    ("climate", "climat"),
    ("flora", "floră"),
    ("fauna", "faună"),
    ("species", "specie"),
    ("population", "populație"),
    ("society", "societate"),
    ("culture", "cultură"),
    ("trade", "comerț"),
    ("disease", "boală"),
    ("epidemic", "epidemie"),
    ("immunity", "imunitate"),
    ("weapon", "armă"),
    ("conquest", "cucerire"),
    ("empire", "imperiu"),
    ("civilization", "civilizație"),
    // Common verbs
    ("flourished", "a prosperat"),
    ("lagged", "a întârziat"),
    ("determines", "determină"),
    ("determined", "a determinat"),
    ("developed", "a dezvoltat"),
    ("emerged", "a apărut"),
    ("introduced", "a introdus"),
    ("introduced", "introduce"),
    ("examines", "examinează"),
    ("presents", "prezintă"),
    ("establishes", "stabilește"),
    ("challenges", "contestă"),
    ("stems", "provine"),
    ("explores", "explorează"),
    ("exploring", "explorând"),
    ("promises", "promite"),
    ("explains", "explică"),
    ("describes", "descrie"),
    ("demonstrates", "demonstrează"),
    ("shows", "arată"),
    ("reveals", "relevă"),
    ("argues", "susține"),
    ("suggests", "sugerează"),
    ("enables", "permite"),
    ("allows", "permite"),
    ("prevents", "previne"),
    ("affects", "afectează"),
    ("influences", "influențează"),
    // Common adjectives
    ("domesticated", "domesticit"),
    ("domesticated animals", "animale domesticite"),
    ("wild", "sălbatic"),
    ("advanced", "avansat"),
    ("primitive", "primitiv"),
    ("complex", "complex"),
    ("simple", "simplu"),
    ("agricultural", "agricol"),
    ("technological", "tehnologic"),
    ("geographic", "geografic"),
    ("environmental", "ambiental"),
    ("biological", "biologic"),
    ("cultural", "cultural"),
    ("historical", "istoric"),
    ("modern", "modern"),
    ("ancient", "antic"),
    // Publishers and sources
    ("W. W. Norton", "W. W. Norton"),
    ("W.W. Norton", "W.W. Norton"),
    ("Norton & Company", "Norton & Company"),
    ("Published by", "Publicată de"),
    ("published", "publicată"),
    ("Diamond's", "lui Diamond"),
    // Educational analysis headers
    ("Educational Analysis", "Analiză Educațională"),
    ("Summary", "Rezumat"),
    ("Key Concepts", "Concepte Cheie"),
    ("Historical & Geographic Context", "Context Istoric și Geografic"),
    ("Connection to Main Thesis", "Conexiune cu Teza Principală"),
    // Page-related and function words
    ("Page", "Pagina"),
    ("Title page", "Pagina de titlu"),
    ("of", "din"),
    ("and", "și"),
    ("in", "în"),
    ("to", "pentru"),
    ("for", "pentru"),
    ("by", "de"),
    ("from", "din"),
    ("with", "cu"),
    ("on", "pe"),
    ("at", "la"),
    ("as", "ca"),
    ("is", "este"),
    ("are", "sunt"),
    ("was", "era"),
    ("were", "erau"),
    ("be", "fi"),
    ("been", "fost"),
    ("this", "acesta"),
    ("that", "acela"),
    ("these", "aceștia"),
    ("those", "aceia"),
    ("which", "care"),
    ("what", "ce"),
    ("who", "cine"),
    ("why", "de ce"),
    ("how", "cum"),
    ("about", "despre"),
];
