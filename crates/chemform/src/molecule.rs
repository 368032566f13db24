// Standard Library Imports
use std::fmt::{self, Display, Formatter};

// External Crate Imports
use miette::SourceSpan;
use tracing::debug;

// Local Crate Imports
use crate::{
    Atom, Count, ElementTable, FormulaError, FormulaErrorKind, FormulaReport, Group, Mass, Massive,
    Molecule, Result, Structure, resolve_groups, tokenize, validate,
};

// Public API ==========================================================================================================

impl<'a> Molecule<'a> {
    /// Parses and checks `formula`, computing its molar mass if (and only if) no problems were found
    ///
    /// Surrounding whitespace is ignored, but everything else is taken literally (case included), so `CO` is carbon
    /// monoxide, while `Co` is cobalt. Every problem with the formula is collected before giving up, so the returned
    /// [`FormulaReport`] lists them all at once.
    pub fn new(db: &'a ElementTable, formula: impl AsRef<str>) -> Result<Self> {
        let formula = formula.as_ref().trim();
        debug!(formula, "evaluating formula");

        let (structure, mut errors) = if formula.contains(['(', ')']) {
            resolve_groups(db, formula)
        } else {
            let (atoms, errors) = tokenize(db, formula);
            let structure = Structure {
                atoms,
                ..Structure::default()
            };
            (structure, errors)
        };
        errors.extend(validate(formula));

        // NOTE: Formulae like `(2)` make it through every check above, but still don't contain a single element
        if errors.is_empty() && structure.is_empty() {
            errors.push(whole_formula_error(FormulaErrorKind::NoElements, formula));
        }

        if !errors.is_empty() {
            debug!(errors = errors.len(), "rejected formula");
            return Err(Box::new(FormulaReport::new(formula, errors)));
        }

        let Some(mass) = structure.checked_mass() else {
            let error = whole_formula_error(FormulaErrorKind::MassOverflow, formula);
            return Err(Box::new(FormulaReport::new(formula, vec![error])));
        };
        debug!(%mass, "computed molar mass");

        Ok(Self { structure, mass })
    }

    pub const fn structure(&self) -> &Structure<'a> {
        &self.structure
    }
}

impl<'a> Structure<'a> {
    pub const fn coefficient(&self) -> Count {
        self.coefficient
    }

    /// Atoms outside of any group, in the order they were written
    pub fn atoms(&self) -> &[Atom<'a>] {
        &self.atoms
    }

    pub fn groups(&self) -> &[Group<'a>] {
        &self.groups
    }

    /// True when there isn't a single atom anywhere in the structure
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.groups.iter().all(|g| g.atoms.is_empty())
    }

    /// The total mass of every atom and group, times the coefficient, or `None` if that total can't be represented
    pub fn checked_mass(&self) -> Option<Mass> {
        let atoms = checked_sum(&self.atoms)?;
        let groups = self.groups.iter().try_fold(Mass::default(), |total, group| {
            total.checked_add(group.checked_mass()?)
        })?;
        atoms.checked_add(groups)?.checked_mul(self.coefficient)
    }
}

impl<'a> Group<'a> {
    pub fn atoms(&self) -> &[Atom<'a>] {
        &self.atoms
    }

    pub const fn subscript(&self) -> Count {
        self.subscript
    }

    pub fn checked_mass(&self) -> Option<Mass> {
        checked_sum(&self.atoms)?.checked_mul(self.subscript)
    }
}

// Trait Implementations ===============================================================================================

impl Massive for Molecule<'_> {
    fn mass(&self) -> Mass {
        self.mass
    }
}

impl Display for Molecule<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.structure)
    }
}

// NOTE: Atoms are always written before groups, since that's the only order that's valid. `(OH)2Ca` resolves to a
// structure that's displayed as `Ca(OH)2`
impl Display for Structure<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let has_coefficient = self.coefficient != Count::default();
        if has_coefficient {
            write!(f, "{}(", self.coefficient)?;
        }
        for atom in &self.atoms {
            write!(f, "{atom}")?;
        }
        for group in &self.groups {
            write!(f, "{group}")?;
        }
        if has_coefficient {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl Display for Group<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for atom in &self.atoms {
            write!(f, "{atom}")?;
        }
        write!(f, "){}", self.subscript)
    }
}

// Private Helper Functions ============================================================================================

fn checked_sum(atoms: &[Atom]) -> Option<Mass> {
    atoms
        .iter()
        .try_fold(Mass::default(), |total, atom| total.checked_add(atom.checked_mass()?))
}

fn whole_formula_error(kind: FormulaErrorKind, formula: &str) -> FormulaError {
    FormulaError::new(kind, [SourceSpan::from(0..formula.len())])
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use insta::assert_snapshot;
    use itertools::Itertools;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    static DB: LazyLock<ElementTable> = LazyLock::new(ElementTable::default);

    fn mass(formula: &str) -> Mass {
        match Molecule::new(&DB, formula) {
            Ok(molecule) => molecule.mass(),
            Err(report) => panic!("{formula} was rejected: {:?}", report.errors()),
        }
    }

    fn messages(formula: &str) -> String {
        let report = Molecule::new(&DB, formula).unwrap_err();
        report.messages().join("\n")
    }

    #[test]
    fn flat_molar_masses() {
        assert_eq!(mass("H2O"), Mass(dec!(18.015)));
        assert_eq!(mass("CO2"), Mass(dec!(44.009)));
        assert_eq!(mass("NaCl"), Mass(dec!(58.44)));
        assert_eq!(mass("C6H12O6"), Mass(dec!(180.156)));
        assert_eq!(mass("H"), Mass(dec!(1.008)));
    }

    #[test]
    fn grouped_molar_masses() {
        assert_eq!(mass("Ca(NO3)2"), Mass(dec!(164.086)));
        assert_eq!(mass("Al2(SO4)3"), Mass(dec!(342.132)));
        assert_eq!(mass("2(H2O)"), Mass(dec!(36.030)));
        assert_eq!(mass("(H2O)(H2O)"), Mass(dec!(36.030)));
        assert_eq!(mass("(H2O)2"), Mass(dec!(36.030)));
        // Zero counts are allowed, they just don't add anything
        assert_eq!(mass("H2O(H2O)0"), Mass(dec!(18.015)));
        assert_eq!(mass("0(H2O)"), Mass(dec!(0)));
    }

    #[test]
    fn masses_are_order_independent() {
        assert_eq!(mass("CH4"), mass("H4C"));
        assert_eq!(mass("NaCl"), mass("ClNa"));
        assert_eq!(mass("CH3CH3"), mass("C2H6"));
        assert_eq!(mass("(OH)2"), mass("O2H2"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(mass("  H2O\n"), Mass(dec!(18.015)));
        assert_eq!(messages("H2 O"), "' ' is not a valid input.");
    }

    #[test]
    fn molecule_structure() {
        let molecule = Molecule::new(&DB, "2(Ca(NO3)2)");
        assert!(molecule.is_err());
        let molecule = Molecule::new(&DB, "Ca(NO3)2").unwrap();
        assert_eq!(molecule.to_string(), "Ca(NO3)2");
        let structure = molecule.structure();
        assert_eq!(structure.coefficient(), Count::new(1));
        assert_eq!(structure.atoms().len(), 1);
        assert_eq!(structure.groups().len(), 1);
        let group = &structure.groups()[0];
        assert_eq!(group.subscript(), Count::new(2));
        assert_eq!(group.to_string(), "(NO3)2");
        assert_eq!(group.checked_mass(), Some(Mass(dec!(124.008))));
        assert_eq!(Molecule::new(&DB, "2(H2O)").unwrap().to_string(), "2(H2O)");
    }

    #[test]
    fn single_errors() {
        assert_snapshot!(messages("h2o"), @"'h, o' are not valid elements.");
        assert_snapshot!(messages("Xy2O"), @"'Xy' is not a valid element.");
        assert_snapshot!(messages("(H2(O))"), @"Nested parentheses are not supported. Simplify your formula.");
        assert_snapshot!(messages("123"), @"Molecule must contain elements.");
        assert_snapshot!(messages("H2O)"), @"Unmatched closing parentheses at position 4.");
        assert_snapshot!(messages("(H2O"), @"Missing closing parentheses.");
        assert_snapshot!(messages("2H2O"), @"Missing parentheses.");
        assert_snapshot!(messages("NH02"), @"Leading zeros are invalid.");
        assert_snapshot!(messages("()"), @"'()' is not a valid input.");
        assert_snapshot!(messages("(OH)2Ca"), @"Molecules inside of parentheses must be placed last.");
    }

    #[test]
    fn formulae_without_elements() {
        for formula in ["", "   ", "(2)", "()2"] {
            let report = Molecule::new(&DB, formula).unwrap_err();
            assert_eq!(report.errors().len(), 1, "{formula:?}");
            assert_eq!(report.errors()[0].kind(), &FormulaErrorKind::NoElements);
        }
        // The whole (trimmed) formula is labelled
        let report = Molecule::new(&DB, " (2) ").unwrap_err();
        assert_eq!(report.formula(), "(2)");
        assert_eq!(report.errors()[0].spans(), [SourceSpan::from(0..3)]);
    }

    #[test]
    fn unknown_elements_come_before_validation_errors() {
        assert_snapshot!(messages("Xy2O)"), @r"
        'Xy' is not a valid element.
        Unmatched closing parentheses at position 5.
        ");
        assert_snapshot!(messages("Qa(h2o)!"), @r"
        'Qa' is not a valid element.
        'h, o' are not valid elements.
        '!' is not a valid input.
        ");
    }

    #[test]
    fn overflowing_masses() {
        let db = ElementTable::new([("H", Decimal::MAX)]).unwrap();
        assert_eq!(Molecule::new(&db, "H").unwrap().mass(), Mass(Decimal::MAX));
        for formula in ["H2", "HH", "(H)2", "2(H)"] {
            let report = Molecule::new(&db, formula).unwrap_err();
            assert_eq!(
                report.messages().collect::<Vec<_>>(),
                ["Molecule is too large to compute a mass for."]
            );
        }
    }

    #[test]
    fn overflowing_counts() {
        assert_snapshot!(messages("H99999999999O"), @"'99999999999' is too large a count.");
        assert_snapshot!(messages("Xy99999999999"), @r"
        '99999999999' is too large a count.
        'Xy' is not a valid element.
        ");
        assert_snapshot!(messages("(OH)99999999999"), @"'99999999999' is too large a count.");
    }
}
