use common_types::{NicheDescriptor, NicheSummary};

pub const GENERIC_NICHE_ID: &str = "generaliste";

const GENERIC_NICHE: NicheDescriptor = NicheDescriptor {
    id: GENERIC_NICHE_ID,
    display_name: "Généraliste",
    key_factors: "Sujet principal identifiable en moins d'une seconde, contraste fort, \
visage expressif si possible, 3 mots maximum en texte incrusté",
    expectations: "Le public généraliste clique sur une promesse claire et une émotion \
lisible, sans avoir besoin de connaître la chaîne",
    common_issues: "Trop d'éléments à l'écran, texte illisible sur mobile, couleurs \
ternes qui se fondent dans le fil d'accueil",
};

// The generic niche must stay first.
static NICHES: [NicheDescriptor; 9] = [
    GENERIC_NICHE,
    NicheDescriptor {
        id: "gaming",
        display_name: "Gaming",
        key_factors: "Personnage ou moment de jeu reconnaissable, réaction du créateur en \
incrustation, couleurs saturées, indices de l'enjeu (victoire, record, défi)",
        expectations: "Les joueurs veulent reconnaître le jeu immédiatement et sentir \
l'intensité ou l'exploit promis",
        common_issues: "Capture d'écran brute sans point focal, logo du jeu trop petit, \
visage surjoué qui ressemble à toutes les autres miniatures",
    },
    NicheDescriptor {
        id: "education",
        display_name: "Éducation",
        key_factors: "Question ou résultat visible, schéma simple, mise en page aérée, \
crédibilité du présentateur",
        expectations: "Le public cherche à comprendre quelque chose de précis et attend \
une promesse d'apprentissage claire",
        common_issues: "Miniature qui ressemble à une diapositive, trop de texte, \
absence de curiosité ou de bénéfice concret",
    },
    NicheDescriptor {
        id: "tech",
        display_name: "Tech",
        key_factors: "Produit net et bien éclairé, comparaison visuelle, fond sobre qui \
fait ressortir l'objet, verdict suggéré",
        expectations: "Les spectateurs veulent un avis tranché ou une révélation sur un \
produit précis",
        common_issues: "Photo de produit générique, reflets, texte technique illisible, \
aucune tension ni verdict",
    },
    NicheDescriptor {
        id: "vlog",
        display_name: "Vlog / Lifestyle",
        key_factors: "Visage authentique et proche, lieu ou situation intrigante, \
lumière naturelle chaleureuse",
        expectations: "L'audience suit une personne et clique pour une histoire ou un \
moment de vie singulier",
        common_issues: "Photo floue ou mal cadrée, situation banale, absence d'émotion \
sur le visage",
    },
    NicheDescriptor {
        id: "cuisine",
        display_name: "Cuisine",
        key_factors: "Plat en gros plan appétissant, textures visibles, couleurs chaudes, \
résultat final mis en avant",
        expectations: "Le public veut saliver et juger en un coup d'œil si la recette \
est faisable",
        common_issues: "Plat terne ou mal éclairé, cadrage trop large, ingrédients \
méconnaissables",
    },
    NicheDescriptor {
        id: "fitness",
        display_name: "Sport & Fitness",
        key_factors: "Transformation ou effort visible, corps en action, chiffres \
concrets (durée, poids, répétitions)",
        expectations: "Les spectateurs attendent un résultat crédible et atteignable",
        common_issues: "Promesse irréaliste, photo posée sans énergie, arrière-plan \
encombré de salle de sport",
    },
    NicheDescriptor {
        id: "finance",
        display_name: "Finance & Business",
        key_factors: "Montant ou graphique explicite, visage sérieux ou surpris, \
contraste fort entre avant et après",
        expectations: "Le public cherche une opportunité ou un avertissement concret \
sur son argent",
        common_issues: "Billets et graphiques clichés, promesses trop racoleuses qui \
nuisent à la crédibilité, chiffres illisibles",
    },
    NicheDescriptor {
        id: "divertissement",
        display_name: "Divertissement",
        key_factors: "Situation absurde ou spectaculaire, réactions exagérées mais \
lisibles, composition dynamique",
        expectations: "Les spectateurs veulent être surpris ou amusés dès la miniature",
        common_issues: "Trop de personnages, gag incompréhensible sans contexte, \
surcharge d'effets graphiques",
    },
];

/// Descriptor for a niche id. Unknown or missing ids get the generic niche.
#[must_use]
pub fn resolve_niche(niche_id: Option<&str>) -> &'static NicheDescriptor {
    niche_id
        .and_then(|id| NICHES.iter().find(|niche| niche.id == id))
        .unwrap_or(&NICHES[0])
}

#[must_use]
pub fn niches() -> &'static [NicheDescriptor] {
    &NICHES
}

#[must_use]
pub fn niche_summaries() -> Vec<NicheSummary> {
    NICHES.iter().map(NicheSummary::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_ids_resolve_to_their_descriptor() {
        let gaming = resolve_niche(Some("gaming"));
        assert_eq!(gaming.id, "gaming");
        assert_eq!(gaming.display_name, "Gaming");
    }

    #[test]
    fn unknown_and_missing_ids_fall_back_to_generic() {
        for id in [None, Some(""), Some("unknown-niche"), Some("GAMING")] {
            let niche = resolve_niche(id);
            assert_eq!(niche.id, GENERIC_NICHE_ID, "{id:?}");
            assert_eq!(niche.display_name, "Généraliste");
        }
    }

    #[test]
    fn ids_are_unique_and_all_resolve_to_themselves() {
        let ids: HashSet<_> = niches().iter().map(|n| n.id).collect();
        assert_eq!(ids.len(), niches().len());
        for niche in niches() {
            assert_eq!(resolve_niche(Some(niche.id)), niche);
        }
    }

    #[test]
    fn summaries_list_every_niche() {
        let summaries = niche_summaries();
        assert_eq!(summaries.len(), niches().len());
        assert_eq!(summaries[0].id, GENERIC_NICHE_ID);
    }
}
