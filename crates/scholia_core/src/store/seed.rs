//! Built-in catalogue used when no persisted academics exist.

use crate::model::academic::TaxonomyCategory::{Discipline, Era, Methodology, Theme, Tradition};
use crate::model::academic::{AcademicRecord, Event, Paper};

/// Returns the default academic records.
pub fn default_academics() -> Vec<AcademicRecord> {
    vec![
        AcademicRecord::new("Michel Foucault")
            .with_bio("French philosopher and historian of ideas whose work traced how knowledge and power shape institutions.")
            .with_tag(Discipline, "Philosophy")
            .with_tag(Discipline, "History")
            .with_tag(Tradition, "Post-structuralism")
            .with_tag(Era, "20th century")
            .with_tag(Methodology, "Genealogy")
            .with_tag(Methodology, "Archaeology of knowledge")
            .with_tag(Theme, "Power")
            .with_tag(Theme, "Discourse")
            .with_tag(Theme, "Sexuality")
            .with_paper(Paper::new("The Order of Things", 1966))
            .with_paper(Paper::new("Discipline and Punish", 1975))
            .with_paper(Paper::new("The History of Sexuality, Vol. 1", 1976))
            .with_event(Event::new("Chair at the Collège de France", 1970, "Paris"))
            .with_connection("Gilles Deleuze")
            .with_connection("Judith Butler"),
        AcademicRecord::new("Gilles Deleuze")
            .with_bio("French philosopher known for a philosophy of difference and, with Félix Guattari, for Capitalism and Schizophrenia.")
            .with_tag(Discipline, "Philosophy")
            .with_tag(Tradition, "Post-structuralism")
            .with_tag(Era, "20th century")
            .with_tag(Theme, "Difference")
            .with_tag(Theme, "Desire")
            .with_tag(Theme, "Power")
            .with_paper(Paper::new("Difference and Repetition", 1968))
            .with_paper(Paper::new("Anti-Oedipus", 1972).with_coauthors(["Félix Guattari"]))
            .with_event(Event::new("Teaching at Paris VIII Vincennes", 1969, "Paris"))
            .with_connection("Michel Foucault")
            .with_connection("Félix Guattari"),
        AcademicRecord::new("Judith Butler")
            .with_bio("American philosopher and gender theorist who developed the theory of gender performativity.")
            .with_tag(Discipline, "Philosophy")
            .with_tag(Discipline, "Gender studies")
            .with_tag(Tradition, "Post-structuralism")
            .with_tag(Tradition, "Feminism")
            .with_tag(Era, "Contemporary")
            .with_tag(Theme, "Gender")
            .with_tag(Theme, "Power")
            .with_tag(Theme, "Performativity")
            .with_paper(Paper::new("Gender Trouble", 1990))
            .with_paper(Paper::new("Bodies That Matter", 1993))
            .with_event(Event::new("Maxine Elliot Professor appointment", 1993, "Berkeley"))
            .with_connection("Michel Foucault"),
        AcademicRecord::new("Pierre Bourdieu")
            .with_bio("French sociologist whose concepts of habitus, field and cultural capital reshaped the study of social reproduction.")
            .with_tag(Discipline, "Sociology")
            .with_tag(Discipline, "Anthropology")
            .with_tag(Tradition, "Structuralism")
            .with_tag(Era, "20th century")
            .with_tag(Methodology, "Fieldwork")
            .with_tag(Methodology, "Statistical analysis")
            .with_tag(Theme, "Class")
            .with_tag(Theme, "Power")
            .with_paper(Paper::new("Outline of a Theory of Practice", 1972))
            .with_paper(Paper::new("Distinction", 1979))
            .with_event(Event::new("Chair of Sociology at the Collège de France", 1981, "Paris"))
            .with_connection("Michel Foucault"),
        AcademicRecord::new("Hannah Arendt")
            .with_bio("German-American political theorist who wrote on totalitarianism, authority and the human condition.")
            .with_tag(Discipline, "Political theory")
            .with_tag(Discipline, "Philosophy")
            .with_tag(Tradition, "Phenomenology")
            .with_tag(Era, "20th century")
            .with_tag(Theme, "Totalitarianism")
            .with_tag(Theme, "Power")
            .with_tag(Theme, "Action")
            .with_paper(Paper::new("The Origins of Totalitarianism", 1951))
            .with_paper(Paper::new("The Human Condition", 1958))
            .with_event(Event::new("Eichmann trial reporting", 1961, "Jerusalem"))
            .with_connection("Martin Heidegger")
            .with_connection("Jürgen Habermas"),
        AcademicRecord::new("Jürgen Habermas")
            .with_bio("German philosopher and sociologist of the Frankfurt School, known for the theory of communicative action.")
            .with_tag(Discipline, "Philosophy")
            .with_tag(Discipline, "Sociology")
            .with_tag(Tradition, "Critical theory")
            .with_tag(Era, "Contemporary")
            .with_tag(Theme, "Public sphere")
            .with_tag(Theme, "Communication")
            .with_tag(Theme, "Democracy")
            .with_paper(Paper::new("The Structural Transformation of the Public Sphere", 1962))
            .with_paper(Paper::new("The Theory of Communicative Action", 1981))
            .with_event(Event::new("Professorship at Goethe University", 1964, "Frankfurt"))
            .with_connection("Hannah Arendt"),
        AcademicRecord::new("Edward Said")
            .with_bio("Palestinian-American literary critic whose Orientalism founded much of postcolonial studies.")
            .with_tag(Discipline, "Literary criticism")
            .with_tag(Tradition, "Postcolonialism")
            .with_tag(Era, "20th century")
            .with_tag(Methodology, "Discourse analysis")
            .with_tag(Theme, "Discourse")
            .with_tag(Theme, "Power")
            .with_tag(Theme, "Empire")
            .with_paper(Paper::new("Orientalism", 1978))
            .with_paper(Paper::new("Culture and Imperialism", 1993))
            .with_event(Event::new("Reith Lectures", 1993, "London"))
            .with_connection("Michel Foucault"),
        AcademicRecord::new("Simone de Beauvoir")
            .with_bio("French existentialist philosopher and writer whose The Second Sex became a founding text of modern feminism.")
            .with_tag(Discipline, "Philosophy")
            .with_tag(Tradition, "Existentialism")
            .with_tag(Tradition, "Feminism")
            .with_tag(Era, "20th century")
            .with_tag(Methodology, "Phenomenology")
            .with_tag(Theme, "Gender")
            .with_tag(Theme, "Freedom")
            .with_paper(Paper::new("The Ethics of Ambiguity", 1947))
            .with_paper(Paper::new("The Second Sex", 1949))
            .with_event(Event::new("Prix Goncourt", 1954, "Paris"))
            .with_connection("Judith Butler"),
    ]
}
