use crate::app::{AtomError, AtomResult};
use crate::constants::MAX_PERIODIC_NUMBER;
use serde::Serialize;

/// Basic metadata describing a chemical element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Element {
    pub atomic_number: u8,
    pub symbol: &'static str,
    pub name: &'static str,
    /// Electrons per shell, innermost first.
    pub electron_config: &'static [u8],
}

impl Element {
    pub const fn new(
        atomic_number: u8,
        symbol: &'static str,
        name: &'static str,
        electron_config: &'static [u8],
    ) -> Self {
        Self {
            atomic_number,
            symbol,
            name,
            electron_config,
        }
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn electron_configuration(&self) -> AtomResult<ElectronConfiguration<'static>> {
        ElectronConfiguration::new(self.electron_config)
    }
}

/// Validated electrons-per-orbit sequence. Orbit `i + 1` holds `counts[i]` electrons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElectronConfiguration<'a> {
    counts: &'a [u8],
}

impl<'a> ElectronConfiguration<'a> {
    pub fn new(counts: &'a [u8]) -> AtomResult<Self> {
        if counts.is_empty() {
            return Err(AtomError::InvalidConfiguration(
                "electron configuration has no orbits".to_owned(),
            ));
        }
        if let Some(index) = counts.iter().position(|&count| count == 0) {
            return Err(AtomError::InvalidConfiguration(format!(
                "orbit {} has no electrons",
                index + 1
            )));
        }
        Ok(Self { counts })
    }

    pub fn orbit_count(&self) -> usize {
        self.counts.len()
    }

    pub fn total_electrons(&self) -> u32 {
        self.counts.iter().map(|&count| u32::from(count)).sum()
    }

    /// `(orbit_number, electron_count)` pairs, orbit numbers starting at 1.
    pub fn orbits(&self) -> impl Iterator<Item = (u32, u32)> + 'a {
        self.counts
            .iter()
            .enumerate()
            .map(|(index, &count)| (index as u32 + 1, u32::from(count)))
    }
}

/// Source of element records, keyed by periodic number.
pub trait ElementSource {
    fn lookup(&self, periodic_number: u32) -> Option<Element>;
}

/// Built-in table covering elements 1-118.
#[derive(Clone, Copy, Debug, Default)]
pub struct PeriodicTable;

impl PeriodicTable {
    pub fn all() -> &'static [Element] {
        &ELEMENTS
    }
}

impl ElementSource for PeriodicTable {
    fn lookup(&self, periodic_number: u32) -> Option<Element> {
        if periodic_number == 0 || periodic_number > MAX_PERIODIC_NUMBER {
            return None;
        }
        ELEMENTS.get(periodic_number as usize - 1).copied()
    }
}

const ELEMENTS: [Element; 118] = [
    Element::new(1, "H", "Hydrogen", &[1]),
    Element::new(2, "He", "Helium", &[2]),
    Element::new(3, "Li", "Lithium", &[2, 1]),
    Element::new(4, "Be", "Beryllium", &[2, 2]),
    Element::new(5, "B", "Boron", &[2, 3]),
    Element::new(6, "C", "Carbon", &[2, 4]),
    Element::new(7, "N", "Nitrogen", &[2, 5]),
    Element::new(8, "O", "Oxygen", &[2, 6]),
    Element::new(9, "F", "Fluorine", &[2, 7]),
    Element::new(10, "Ne", "Neon", &[2, 8]),
    Element::new(11, "Na", "Sodium", &[2, 8, 1]),
    Element::new(12, "Mg", "Magnesium", &[2, 8, 2]),
    Element::new(13, "Al", "Aluminium", &[2, 8, 3]),
    Element::new(14, "Si", "Silicon", &[2, 8, 4]),
    Element::new(15, "P", "Phosphorus", &[2, 8, 5]),
    Element::new(16, "S", "Sulfur", &[2, 8, 6]),
    Element::new(17, "Cl", "Chlorine", &[2, 8, 7]),
    Element::new(18, "Ar", "Argon", &[2, 8, 8]),
    Element::new(19, "K", "Potassium", &[2, 8, 8, 1]),
    Element::new(20, "Ca", "Calcium", &[2, 8, 8, 2]),
    Element::new(21, "Sc", "Scandium", &[2, 8, 9, 2]),
    Element::new(22, "Ti", "Titanium", &[2, 8, 10, 2]),
    Element::new(23, "V", "Vanadium", &[2, 8, 11, 2]),
    Element::new(24, "Cr", "Chromium", &[2, 8, 13, 1]),
    Element::new(25, "Mn", "Manganese", &[2, 8, 13, 2]),
    Element::new(26, "Fe", "Iron", &[2, 8, 14, 2]),
    Element::new(27, "Co", "Cobalt", &[2, 8, 15, 2]),
    Element::new(28, "Ni", "Nickel", &[2, 8, 16, 2]),
    Element::new(29, "Cu", "Copper", &[2, 8, 18, 1]),
    Element::new(30, "Zn", "Zinc", &[2, 8, 18, 2]),
    Element::new(31, "Ga", "Gallium", &[2, 8, 18, 3]),
    Element::new(32, "Ge", "Germanium", &[2, 8, 18, 4]),
    Element::new(33, "As", "Arsenic", &[2, 8, 18, 5]),
    Element::new(34, "Se", "Selenium", &[2, 8, 18, 6]),
    Element::new(35, "Br", "Bromine", &[2, 8, 18, 7]),
    Element::new(36, "Kr", "Krypton", &[2, 8, 18, 8]),
    Element::new(37, "Rb", "Rubidium", &[2, 8, 18, 8, 1]),
    Element::new(38, "Sr", "Strontium", &[2, 8, 18, 8, 2]),
    Element::new(39, "Y", "Yttrium", &[2, 8, 18, 9, 2]),
    Element::new(40, "Zr", "Zirconium", &[2, 8, 18, 10, 2]),
    Element::new(41, "Nb", "Niobium", &[2, 8, 18, 12, 1]),
    Element::new(42, "Mo", "Molybdenum", &[2, 8, 18, 13, 1]),
    Element::new(43, "Tc", "Technetium", &[2, 8, 18, 13, 2]),
    Element::new(44, "Ru", "Ruthenium", &[2, 8, 18, 15, 1]),
    Element::new(45, "Rh", "Rhodium", &[2, 8, 18, 16, 1]),
    Element::new(46, "Pd", "Palladium", &[2, 8, 18, 18]),
    Element::new(47, "Ag", "Silver", &[2, 8, 18, 18, 1]),
    Element::new(48, "Cd", "Cadmium", &[2, 8, 18, 18, 2]),
    Element::new(49, "In", "Indium", &[2, 8, 18, 18, 3]),
    Element::new(50, "Sn", "Tin", &[2, 8, 18, 18, 4]),
    Element::new(51, "Sb", "Antimony", &[2, 8, 18, 18, 5]),
    Element::new(52, "Te", "Tellurium", &[2, 8, 18, 18, 6]),
    Element::new(53, "I", "Iodine", &[2, 8, 18, 18, 7]),
    Element::new(54, "Xe", "Xenon", &[2, 8, 18, 18, 8]),
    Element::new(55, "Cs", "Caesium", &[2, 8, 18, 18, 8, 1]),
    Element::new(56, "Ba", "Barium", &[2, 8, 18, 18, 8, 2]),
    Element::new(57, "La", "Lanthanum", &[2, 8, 18, 18, 9, 2]),
    Element::new(58, "Ce", "Cerium", &[2, 8, 18, 19, 9, 2]),
    Element::new(59, "Pr", "Praseodymium", &[2, 8, 18, 21, 8, 2]),
    Element::new(60, "Nd", "Neodymium", &[2, 8, 18, 22, 8, 2]),
    Element::new(61, "Pm", "Promethium", &[2, 8, 18, 23, 8, 2]),
    Element::new(62, "Sm", "Samarium", &[2, 8, 18, 24, 8, 2]),
    Element::new(63, "Eu", "Europium", &[2, 8, 18, 25, 8, 2]),
    Element::new(64, "Gd", "Gadolinium", &[2, 8, 18, 25, 9, 2]),
    Element::new(65, "Tb", "Terbium", &[2, 8, 18, 27, 8, 2]),
    Element::new(66, "Dy", "Dysprosium", &[2, 8, 18, 28, 8, 2]),
    Element::new(67, "Ho", "Holmium", &[2, 8, 18, 29, 8, 2]),
    Element::new(68, "Er", "Erbium", &[2, 8, 18, 30, 8, 2]),
    Element::new(69, "Tm", "Thulium", &[2, 8, 18, 31, 8, 2]),
    Element::new(70, "Yb", "Ytterbium", &[2, 8, 18, 32, 8, 2]),
    Element::new(71, "Lu", "Lutetium", &[2, 8, 18, 32, 9, 2]),
    Element::new(72, "Hf", "Hafnium", &[2, 8, 18, 32, 10, 2]),
    Element::new(73, "Ta", "Tantalum", &[2, 8, 18, 32, 11, 2]),
    Element::new(74, "W", "Tungsten", &[2, 8, 18, 32, 12, 2]),
    Element::new(75, "Re", "Rhenium", &[2, 8, 18, 32, 13, 2]),
    Element::new(76, "Os", "Osmium", &[2, 8, 18, 32, 14, 2]),
    Element::new(77, "Ir", "Iridium", &[2, 8, 18, 32, 15, 2]),
    Element::new(78, "Pt", "Platinum", &[2, 8, 18, 32, 17, 1]),
    Element::new(79, "Au", "Gold", &[2, 8, 18, 32, 18, 1]),
    Element::new(80, "Hg", "Mercury", &[2, 8, 18, 32, 18, 2]),
    Element::new(81, "Tl", "Thallium", &[2, 8, 18, 32, 18, 3]),
    Element::new(82, "Pb", "Lead", &[2, 8, 18, 32, 18, 4]),
    Element::new(83, "Bi", "Bismuth", &[2, 8, 18, 32, 18, 5]),
    Element::new(84, "Po", "Polonium", &[2, 8, 18, 32, 18, 6]),
    Element::new(85, "At", "Astatine", &[2, 8, 18, 32, 18, 7]),
    Element::new(86, "Rn", "Radon", &[2, 8, 18, 32, 18, 8]),
    Element::new(87, "Fr", "Francium", &[2, 8, 18, 32, 18, 8, 1]),
    Element::new(88, "Ra", "Radium", &[2, 8, 18, 32, 18, 8, 2]),
    Element::new(89, "Ac", "Actinium", &[2, 8, 18, 32, 18, 9, 2]),
    Element::new(90, "Th", "Thorium", &[2, 8, 18, 32, 18, 10, 2]),
    Element::new(91, "Pa", "Protactinium", &[2, 8, 18, 32, 20, 9, 2]),
    Element::new(92, "U", "Uranium", &[2, 8, 18, 32, 21, 9, 2]),
    Element::new(93, "Np", "Neptunium", &[2, 8, 18, 32, 22, 9, 2]),
    Element::new(94, "Pu", "Plutonium", &[2, 8, 18, 32, 24, 8, 2]),
    Element::new(95, "Am", "Americium", &[2, 8, 18, 32, 25, 8, 2]),
    Element::new(96, "Cm", "Curium", &[2, 8, 18, 32, 25, 9, 2]),
    Element::new(97, "Bk", "Berkelium", &[2, 8, 18, 32, 27, 8, 2]),
    Element::new(98, "Cf", "Californium", &[2, 8, 18, 32, 28, 8, 2]),
    Element::new(99, "Es", "Einsteinium", &[2, 8, 18, 32, 29, 8, 2]),
    Element::new(100, "Fm", "Fermium", &[2, 8, 18, 32, 30, 8, 2]),
    Element::new(101, "Md", "Mendelevium", &[2, 8, 18, 32, 31, 8, 2]),
    Element::new(102, "No", "Nobelium", &[2, 8, 18, 32, 32, 8, 2]),
    Element::new(103, "Lr", "Lawrencium", &[2, 8, 18, 32, 32, 8, 3]),
    Element::new(104, "Rf", "Rutherfordium", &[2, 8, 18, 32, 32, 10, 2]),
    Element::new(105, "Db", "Dubnium", &[2, 8, 18, 32, 32, 11, 2]),
    Element::new(106, "Sg", "Seaborgium", &[2, 8, 18, 32, 32, 12, 2]),
    Element::new(107, "Bh", "Bohrium", &[2, 8, 18, 32, 32, 13, 2]),
    Element::new(108, "Hs", "Hassium", &[2, 8, 18, 32, 32, 14, 2]),
    Element::new(109, "Mt", "Meitnerium", &[2, 8, 18, 32, 32, 15, 2]),
    Element::new(110, "Ds", "Darmstadtium", &[2, 8, 18, 32, 32, 16, 2]),
    Element::new(111, "Rg", "Roentgenium", &[2, 8, 18, 32, 32, 17, 2]),
    Element::new(112, "Cn", "Copernicium", &[2, 8, 18, 32, 32, 18, 2]),
    Element::new(113, "Nh", "Nihonium", &[2, 8, 18, 32, 32, 18, 3]),
    Element::new(114, "Fl", "Flerovium", &[2, 8, 18, 32, 32, 18, 4]),
    Element::new(115, "Mc", "Moscovium", &[2, 8, 18, 32, 32, 18, 5]),
    Element::new(116, "Lv", "Livermorium", &[2, 8, 18, 32, 32, 18, 6]),
    Element::new(117, "Ts", "Tennessine", &[2, 8, 18, 32, 32, 18, 7]),
    Element::new(118, "Og", "Oganesson", &[2, 8, 18, 32, 32, 18, 8]),
];
