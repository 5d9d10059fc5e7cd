#![forbid(unsafe_code)]

//! The built-in dataset: published results of binary PSO, binary GSA, a
//! PSO-GSA hybrid, and the binary whale optimization algorithm on three
//! multidimensional knapsack instances.
//!
//! Per-iteration trajectories were not published, only their endpoints and
//! time constants, so series are regenerated with [`ExponentialApproach`].

use crate::curve::ExponentialApproach;
use crate::dataset::{
    AlgorithmFamily, AlgorithmVariant, ConvergenceSeries, Dataset, DatasetProvider, InfoNote,
    InstanceComparison, MetricChartKind, MetricRow, MetricTable, NoteTone, ProblemInstance,
    SummaryStat, YDomain,
};
use crate::error::Result;

/// Number of iterations in every generated series.
pub const DEFAULT_HORIZON: u32 = 1000;

const MKP1: &str = "MKP1";
const MKP7: &str = "MKP7";
const MKP8: &str = "MKP8";

/// Provider for the built-in dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleDataset {
    horizon: u32,
}

impl Default for SampleDataset {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
        }
    }
}

impl SampleDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the number of iterations per series.
    pub fn horizon(mut self, horizon: u32) -> Self {
        self.horizon = horizon;
        self
    }

    /// Build the dataset. Infallible; [`DatasetProvider::load`] wraps this.
    pub fn build(&self) -> Dataset {
        tracing::debug!(horizon = self.horizon, "building sample dataset");
        Dataset {
            title: "Analyse Comparative des Algorithmes d'Optimisation".into(),
            families: vec![
                self.bpso(),
                self.bgsa(),
                self.hybrid(),
                self.bwoa(),
            ],
            comparisons: self.comparisons(),
            comparison_notes: comparison_notes(),
        }
    }

    fn curves(&self, instance: &str, specs: &[(&str, ExponentialApproach)]) -> Vec<ConvergenceSeries> {
        specs
            .iter()
            .map(|(alg, curve)| curve.series(*alg, instance, self.horizon))
            .collect()
    }

    fn bpso(&self) -> AlgorithmFamily {
        let mut family = AlgorithmFamily::new("BPSO", "Analyse Comparative des Variantes BPSO");
        family.variants = vec![
            bpso_variant("BPSO1", "Dynamique (0.9 → 0.4)", "6.0", "6.0", "Balance entre exploration et exploitation"),
            bpso_variant("BPSO2", "Statique (0.8)", "8.0", "4.0", "Favorise l'exploration cognitive"),
            bpso_variant("BPSO3", "Statique (0.7)", "3.0", "7.0", "Favorise l'exploitation sociale"),
            bpso_variant(
                "BPSO4",
                "Dynamique (0.9 → 0.4)",
                "9.0",
                "11.0",
                "Forte influence des composantes cognitives et sociales",
            ),
        ];
        family.series = self.curves(
            MKP1,
            &[
                ("BPSO1", ExponentialApproach::from_zero(141_240.33, 200.0)),
                ("BPSO2", ExponentialApproach::from_zero(141_277.33, 150.0)),
                ("BPSO3", ExponentialApproach::from_zero(141_188.33, 180.0)),
                ("BPSO4", ExponentialApproach::from_zero(141_206.00, 170.0)),
            ],
        );
        family.series.extend(self.curves(
            MKP7,
            &[
                ("BPSO1", ExponentialApproach::from_zero(1_041_702.27, 300.0)),
                ("BPSO2", ExponentialApproach::from_zero(1_050_407.60, 250.0)),
                ("BPSO3", ExponentialApproach::from_zero(1_035_340.93, 280.0)),
                ("BPSO4", ExponentialApproach::from_zero(1_046_656.93, 270.0)),
            ],
        ));
        family.metrics = Some(bar_metrics(
            &["BPSO1", "BPSO2", "BPSO3", "BPSO4"],
            &[
                ("Convergence", [85.0, 95.0, 75.0, 80.0]),
                ("Stabilité", [80.0, 90.0, 85.0, 75.0]),
                ("Qualité Solution", [88.0, 95.0, 82.0, 85.0]),
            ],
        ));
        family.notes = vec![InfoNote::new("Conclusions de l'Analyse", NoteTone::Info).items([
            "BPSO2 démontre la meilleure performance globale avec une convergence rapide et stable",
            "L'équilibre entre c1 (8.0) et c2 (4.0) de BPSO2 favorise une exploration efficace",
            "Les variantes à inertie dynamique montrent une adaptabilité accrue mais moins de stabilité",
            "La configuration de BPSO2 semble particulièrement adaptée aux problèmes de grande dimension",
            "Le compromis exploration/exploitation de BPSO2 permet une meilleure gestion des contraintes",
        ])];
        family
    }

    fn bgsa(&self) -> AlgorithmFamily {
        let mut family = AlgorithmFamily::new("BGSA", "Analyse des Variantes BGSA");
        family.variants = vec![
            bgsa_variant("BGSA1", 100.0, 20.0, "Dynamique (0.9 → 0.4)", "Balance optimale entre exploration et exploitation"),
            bgsa_variant("BGSA2", 50.0, 10.0, "Statique (0.7)", "Exploration modérée avec convergence plus lente"),
            bgsa_variant("BGSA3", 150.0, 30.0, "Dynamique (0.95 → 0.3)", "Exploration agressive avec transition rapide"),
        ];
        family.series = self.curves(
            MKP1,
            &[
                ("BGSA1", ExponentialApproach::new(130_000.0, 137_605.13, 200.0)),
                ("BGSA2", ExponentialApproach::new(130_000.0, 137_473.67, 180.0)),
                ("BGSA3", ExponentialApproach::new(130_000.0, 137_547.83, 190.0)),
            ],
        );
        family.series.extend(self.curves(
            MKP7,
            &[
                ("BGSA1", ExponentialApproach::new(800_000.0, 899_724.93, 300.0)),
                ("BGSA2", ExponentialApproach::new(800_000.0, 893_257.83, 280.0)),
                ("BGSA3", ExponentialApproach::new(800_000.0, 894_230.40, 290.0)),
            ],
        ));
        family.metrics = Some(bar_metrics(
            &["BGSA1", "BGSA2", "BGSA3"],
            &[
                ("Petites Instances", [95.0, 88.0, 90.0]),
                ("Grandes Instances", [92.0, 85.0, 87.0]),
                ("Stabilité", [94.0, 86.0, 85.0]),
            ],
        ));
        family.notes = vec![
            InfoNote::new("Conclusions de l'Analyse BGSA", NoteTone::Info).items([
                "BGSA1 (G0=100, α=20) montre les meilleures performances globales avec une convergence équilibrée",
                "La combinaison d'un G0 modéré et d'une décroissance adaptée (α=20) permet une meilleure exploration",
                "L'inertie dynamique de BGSA1 facilite la transition entre exploration et exploitation",
                "Les variantes avec G0 plus élevé (BGSA3) montrent une convergence plus aggressive mais moins stable",
                "BGSA1 maintient une performance supérieure sur les instances de grande taille",
                "La stabilité de BGSA1 est particulièrement notable sur les problèmes fortement contraints",
            ]),
            InfoNote::new("Points Clés pour l'Hybridation", NoteTone::Info).items([
                "La configuration de BGSA1 offre le meilleur potentiel pour l'hybridation avec d'autres méthodes",
                "Le mécanisme de contrôle de force gravitationnelle permet une adaptation naturelle à différentes phases de recherche",
                "La stabilité de convergence de BGSA1 en fait un candidat idéal pour l'intensification locale",
            ]),
        ];
        family
    }

    fn hybrid(&self) -> AlgorithmFamily {
        let mut family = AlgorithmFamily::new("Hybrid", "Analyse de l'Algorithme Hybride PSO-GSA");
        family.variants = vec![
            AlgorithmVariant::new("Hybrid")
                .display_name("Hybride PSO-GSA")
                .param("w", "0.9 → 0.4")
                .param("c1", "8.0")
                .param("c2", "4.0")
                .param("G0", 100.0)
                .param("α", 20.0)
                .param("Force limite", 100.0)
                .param("Poids GSA", "0.2 → 0.4"),
        ];
        family.series = self.curves(
            MKP1,
            &[
                ("BPSO", ExponentialApproach::from_zero(141_277.33, 150.0)),
                ("BGSA", ExponentialApproach::from_zero(137_605.13, 200.0)),
                ("Hybrid", ExponentialApproach::from_zero(141_278.00, 120.0)),
            ],
        );
        family.series.extend(self.curves(
            MKP7,
            &[
                ("BPSO", ExponentialApproach::from_zero(1_050_407.60, 250.0)),
                ("BGSA", ExponentialApproach::from_zero(899_724.93, 300.0)),
                ("Hybrid", ExponentialApproach::from_zero(1_067_471.00, 200.0)),
            ],
        ));
        family.metrics = Some(metric_table(
            "Profil de Performance",
            MetricChartKind::Radar,
            &["BPSO", "BGSA", "Hybrid"],
            &[
                ("Qualité Solution", [90.0, 85.0, 98.0]),
                ("Vitesse Convergence", [85.0, 80.0, 95.0]),
                ("Stabilité", [88.0, 82.0, 94.0]),
                ("Exploration", [85.0, 90.0, 95.0]),
                ("Exploitation", [90.0, 85.0, 96.0]),
            ],
        ));
        family.notes = vec![
            InfoNote::new("Conclusions de l'Analyse Hybride", NoteTone::Info).items([
                "L'algorithme hybride combine efficacement les forces de PSO et GSA:",
                "- Exploration améliorée grâce au mécanisme gravitationnel de GSA",
                "- Exploitation efficace héritée de PSO",
                "Amélioration notable des performances:",
                "- Convergence plus rapide que les algorithmes individuels",
                "- Meilleures solutions sur les instances complexes",
                "- Stabilité accrue des résultats",
                "Points forts spécifiques:",
                "- Adaptation dynamique de la balance PSO-GSA",
                "- Robustesse sur différentes tailles d'instances",
                "- Gestion efficace des contraintes multiples",
            ]),
            InfoNote::new("Améliorations Statistiques Notables", NoteTone::Success).items([
                "Réduction de 20% du temps de convergence moyen",
                "Amélioration de 5-8% de la qualité des solutions",
                "Réduction de 30% de la variance des résultats",
                "Performance supérieure sur 9/10 instances de test",
            ]),
        ];
        family
    }

    fn bwoa(&self) -> AlgorithmFamily {
        let mut family = AlgorithmFamily::new("BWOA", "Binary Whale Optimization Algorithm (BWOA)");
        family.variants = vec![
            AlgorithmVariant::new("BWOA")
                .param("a", "2.0 → 0.1")
                .param("b", "1.0")
                .param("p", "0.5")
                .description("Binarisation par fonction sigmoïde, seuil 0.5"),
        ];
        family.reference_lines = true;
        family.series = vec![
            ExponentialApproach::new(120_000.0, 141_278.0, 200.0).series("BWOA", MKP1, self.horizon),
            ExponentialApproach::new(900_000.0, 1_088_432.0, 300.0).series("BWOA", MKP7, self.horizon),
        ];
        family.notes = vec![
            InfoNote::new("Phase d'Encerclement", NoteTone::Info).items([
                "Les baleines localisent leur proie et l'encerclent",
                "Paramètres: a: 2.0 → 0.1, A: [-a, a]",
                "Équation: X(t+1) = σ(X* - A·D)",
                "Exploration initiale efficace",
            ]),
            InfoNote::new("Phase d'Exploitation", NoteTone::Success).items([
                "Mouvement en spirale vers la proie",
                "Paramètres: b: 1.0, l: [-1, 1]",
                "Équation: X(t+1) = σ(D·e^{bl}·cos(2πl) + X*)",
                "Raffinement local des solutions",
            ]),
            InfoNote::new("Phase d'Exploration", NoteTone::Warning).items([
                "Recherche globale de nouvelles zones",
                "Paramètres: p: 0.5 (probabilité)",
                "Équation: X(t+1) = σ(X_rand - A·|C·X_rand - X|)",
                "Diversification des solutions",
            ]),
            InfoNote::new("Binarisation", NoteTone::Default).items([
                "Fonction sigmoid: σ(x) = 1/(1 + e^(-x))",
                "Seuil de décision: 0.5",
                "Mise à jour position: si σ(x) > 0.5 alors 1, sinon 0",
            ]),
            InfoNote::new("Contrôle des Paramètres", NoteTone::Default).items([
                "Coefficient a: décroissance linéaire",
                "Vecteurs aléatoires r: [0,1]",
                "Balance dynamique des phases",
            ]),
            InfoNote::new("Petites Instances (≤ 50 variables)", NoteTone::Info).items([
                "Convergence Rapide: Atteinte de l'optimum en ~150-200 itérations",
                "Phase d'Exploitation: Dominante après 100 itérations",
                "Stabilité: Écart-type réduit (≤ 1% de la moyenne)",
                "Précision: Solutions optimales ou quasi-optimales (>99%)",
            ]),
            InfoNote::new("Grandes Instances (> 50 variables)", NoteTone::Info).items([
                "Exploration Étendue: Phase initiale prolongée (~300 itérations)",
                "Adaptation Dynamique: Ajustement continu des paramètres de contrôle",
                "Gestion des Contraintes: Mécanisme robuste de réparation",
                "Performance: Solutions de haute qualité avec stabilité acceptable",
            ]),
            InfoNote::new("Points Clés de l'Algorithme BWOA", NoteTone::Success).items([
                "Excellente capacité d'adaptation à différentes tailles de problèmes",
                "Balance efficace entre exploration globale et exploitation locale",
                "Robustesse accrue grâce au mécanisme de spirale unique",
                "Performance compétitive sur les instances complexes du MKP",
            ]),
        ];
        family
    }

    fn comparisons(&self) -> Vec<InstanceComparison> {
        // (algorithm, best, mean, stdDev, start, time constant / 20)
        type Row = (&'static str, f64, f64, f64, f64, f64);
        let table: [(ProblemInstance, (f64, f64), [Row; 4]); 3] = [
            (
                ProblemInstance::new(MKP1, 28),
                (130_000.0, 142_000.0),
                [
                    ("BPSO", 141_278.0, 141_277.33, 3.59, 138_000.0, 10.0),
                    ("BGSA", 141_137.0, 137_605.13, 1227.35, 135_000.0, 15.0),
                    ("Hybrid", 141_278.0, 141_278.0, 0.0, 139_000.0, 8.0),
                    ("BWOA", 141_278.0, 141_023.03, 389.90, 137_000.0, 12.0),
                ],
            ),
            (
                ProblemInstance::new(MKP7, 105),
                (800_000.0, 1_100_000.0),
                [
                    ("BPSO", 1_060_421.0, 1_050_407.6, 5225.30, 900_000.0, 15.0),
                    ("BGSA", 933_132.0, 899_724.93, 14_723.39, 800_000.0, 20.0),
                    ("Hybrid", 1_067_471.0, 1_047_452.77, 8916.45, 950_000.0, 12.0),
                    ("BWOA", 1_088_432.0, 1_074_685.3, 8618.53, 980_000.0, 10.0),
                ],
            ),
            (
                ProblemInstance::new(MKP8, 105),
                (300_000.0, 600_000.0),
                [
                    ("BPSO", 508_240.0, 458_900.67, 18_482.39, 400_000.0, 15.0),
                    ("BGSA", 470_586.0, 409_416.9, 18_722.75, 350_000.0, 20.0),
                    ("Hybrid", 518_077.0, 474_464.13, 16_085.13, 420_000.0, 12.0),
                    ("BWOA", 598_761.0, 569_443.57, 14_823.59, 500_000.0, 10.0),
                ],
            ),
        ];

        table
            .into_iter()
            .map(|(instance, (min, max), rows)| {
                let id = instance.id.clone();
                InstanceComparison {
                    y_domain: YDomain { min, max },
                    summaries: rows
                        .iter()
                        .map(|&(alg, best, mean, sd, _, _)| SummaryStat::new(alg, &id, best, mean, sd))
                        .collect(),
                    series: rows
                        .iter()
                        .map(|&(alg, best, _, _, start, tau)| {
                            ExponentialApproach::new(start, best, tau * 20.0).series(alg, &id, self.horizon)
                        })
                        .collect(),
                    instance,
                }
            })
            .collect()
    }
}

impl DatasetProvider for SampleDataset {
    fn load(&self) -> Result<Dataset> {
        Ok(self.build())
    }
}

fn bpso_variant(id: &str, inertia: &str, c1: &str, c2: &str, description: &str) -> AlgorithmVariant {
    AlgorithmVariant::new(id)
        .param("Inertie (w)", inertia)
        .param("c1", c1)
        .param("c2", c2)
        .param("Caractéristiques", description)
}

fn bgsa_variant(id: &str, g0: f64, alpha: f64, inertia: &str, description: &str) -> AlgorithmVariant {
    AlgorithmVariant::new(id)
        .param("G0", g0)
        .param("α", alpha)
        .param("Inertie", inertia)
        .param("Caractéristiques", description)
}

fn bar_metrics<const N: usize>(series: &[&str; N], rows: &[(&str, [f64; N])]) -> MetricTable {
    metric_table("Métriques de Performance", MetricChartKind::Bar, series, rows)
}

fn metric_table<const N: usize>(
    title: &str,
    kind: MetricChartKind,
    series: &[&str; N],
    rows: &[(&str, [f64; N])],
) -> MetricTable {
    MetricTable {
        title: title.into(),
        kind,
        series: series.iter().map(|s| s.to_string()).collect(),
        rows: rows
            .iter()
            .map(|(metric, scores)| {
                series
                    .iter()
                    .zip(scores.iter())
                    .fold(MetricRow::new(*metric), |row, (id, v)| row.score(*id, *v))
            })
            .collect(),
    }
}

fn comparison_notes() -> Vec<InfoNote> {
    vec![
        InfoNote::new("Performance sur Petites Instances", NoteTone::Info).items([
            "BPSO, Hybrid et BWOA atteignent l'optimum (141278.0) sur MKP1",
            "L'algorithme Hybrid montre une stabilité exceptionnelle (écart-type = 0)",
            "BGSA présente des performances moins stables (écart-type = 1227.35)",
        ]),
        InfoNote::new("Performance sur Grandes Instances", NoteTone::Info).items([
            "BWOA excelle sur MKP7 (1088432.0) et MKP8 (598761.0)",
            "L'algorithme Hybrid maintient de bonnes performances",
            "Les écarts-types augmentent significativement avec la taille du problème",
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_in_tab_order() {
        let ds = SampleDataset::new().build();
        let ids: Vec<&str> = ds.families.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["BPSO", "BGSA", "Hybrid", "BWOA"]);
    }

    #[test]
    fn comparison_series_end_near_best() {
        let ds = SampleDataset::new().build();
        let mkp1 = ds.comparison("MKP1").unwrap();
        for series in &mkp1.series {
            let best = mkp1.summary(&series.algorithm_id).unwrap().best;
            let last = series.points.last().unwrap().value;
            assert!(last <= best);
            assert!(best - last < best * 0.01, "{} ended at {last}", series.algorithm_id);
        }
    }

    #[test]
    fn horizon_override_applies_everywhere() {
        let ds = SampleDataset::new().horizon(10).build();
        assert!(ds.families.iter().flat_map(|f| &f.series).all(|s| s.len() == 10));
        assert!(ds.comparisons.iter().flat_map(|c| &c.series).all(|s| s.len() == 10));
    }
}
