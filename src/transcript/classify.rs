//! Grade and qualification classifiers.

/// Passing grade threshold, inclusive.
const PASSING_GRADE: f64 = 6.0;

/// Academic standing derived from a final grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Situacao {
    Aprovado,
    Reprovado,
}

impl Situacao {
    pub fn from_grade(grade: f64) -> Self {
        if grade >= PASSING_GRADE {
            Situacao::Aprovado
        } else {
            Situacao::Reprovado
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Situacao::Aprovado => "Aprovado",
            Situacao::Reprovado => "Reprovado",
        }
    }
}

/// Abbreviated academic title derived from a teacher's free-text
/// qualification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Titulacao {
    Doutor,
    Mestre,
    Especialista,
}

impl Titulacao {
    /// Highest title mentioned wins; anything unrecognized is reported
    /// as specialist.
    pub fn from_qualification(qualification: &str) -> Self {
        let lower = qualification.to_lowercase();
        if lower.contains("doutor") {
            Titulacao::Doutor
        } else if lower.contains("mestr") {
            Titulacao::Mestre
        } else {
            Titulacao::Especialista
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Titulacao::Doutor => "Dout.",
            Titulacao::Mestre => "Mest.",
            Titulacao::Especialista => "Esp.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passing_grade_is_inclusive() {
        assert_eq!(Situacao::from_grade(6.0), Situacao::Aprovado);
        assert_eq!(Situacao::from_grade(5.9), Situacao::Reprovado);
        assert_eq!(Situacao::from_grade(10.0), Situacao::Aprovado);
        assert_eq!(Situacao::from_grade(0.0), Situacao::Reprovado);
    }

    #[test]
    fn test_titulacao_matches_feminine_forms() {
        assert_eq!(Titulacao::from_qualification("Doutora em Letras"), Titulacao::Doutor);
        assert_eq!(Titulacao::from_qualification("Mestra em Educação"), Titulacao::Mestre);
    }

    #[test]
    fn test_titulacao_case_insensitive() {
        assert_eq!(Titulacao::from_qualification("DOUTOR EM FÍSICA"), Titulacao::Doutor);
        assert_eq!(Titulacao::from_qualification("mestrado em química"), Titulacao::Mestre);
    }

    #[test]
    fn test_titulacao_default_is_especialista() {
        assert_eq!(Titulacao::from_qualification("Especialista em Redes"), Titulacao::Especialista);
        assert_eq!(Titulacao::from_qualification(""), Titulacao::Especialista);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Situacao::Aprovado.label(), "Aprovado");
        assert_eq!(Titulacao::Doutor.label(), "Dout.");
        assert_eq!(Titulacao::Especialista.label(), "Esp.");
    }
}
