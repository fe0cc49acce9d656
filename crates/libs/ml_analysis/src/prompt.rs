use common_types::{AnalysisMode, NicheDescriptor};

const EXPERT_RUBRIC: &str = "Analyse cette miniature selon ces facteurs de CTR mesurés :

CRITÈRES VISUELS (60% du score) :
• Luminosité/contraste : Attire-t-elle l'œil dans un feed saturé ?
• Visage humain : Présent ? Expression claire (neutre/souriant/choqué/surpris) ?
• Couleurs dominantes : Rouge/jaune (haute performance) ou couleurs ternes ?
• Lisibilité mobile : Texte lisible sur smartphone 6 pouces ?
• Point focal unique : Un élément principal clair ou dispersion visuelle ?

CRITÈRES TECHNIQUES (25% du score) :
• Texte sur miniature : Nombre de mots (0-3 optimal) ? Taille suffisante ?
• Objets visuels : Flèches, cercles, emojis pour guider l'œil ?
• Composition : Règle des tiers respectée ? Équilibre visuel ?
• Différenciation : Sort du lot vs miniatures standards de la niche ?

CRITÈRES TITRE (15% du score) :
• Longueur : 40-60 caractères optimal
• Curiosity gap : Promet sans révéler complètement
• Urgence/émotion : Mots déclencheurs présents ?
• Cohérence visuel-titre : Image et titre se complètent-ils ?

Donne une analyse experte avec un score /10 basé sur ces critères mesurables et un CTR estimé réaliste.";

const EXPERT_SCHEMA: &str = r#"Format JSON strict :
{
  "score": [1-10],
  "ctrEstimate": "[X.X]%",
  "analysis": "Cette miniature obtient X/10 car [analyse détaillée des forces]... Cependant, elle perd des points sur [faiblesses spécifiques avec explications]...",
  "visualFactors": {
    "facePresent": true/false,
    "emotion": "neutre/souriant/choqué/surpris/absent",
    "colorScheme": "rouge-jaune/bleu-vert/neutre/sombre",
    "textCount": X,
    "mobileFriendly": true/false,
    "contrast": "élevé/moyen/faible"
  },
  "strengths": ["force spécifique 1 avec explication", "force spécifique 2 avec explication", "force spécifique 3 avec explication"],
  "improvements": ["manque précis 1 avec impact", "manque précis 2 avec impact"],
  "suggestions": ["action concrète 1 avec justification", "action concrète 2 avec justification", "action concrète 3 avec justification"]
}"#;

const NICHE_SCHEMA: &str = r#"Format JSON strict :
{
  "score": [1-10],
  "analysisText": "Analyse en 2 à 4 phrases : ce qui fonctionne pour cette niche, puis ce qui freine le clic.",
  "suggestions": ["action concrète 1 adaptée à la niche", "action concrète 2 adaptée à la niche", "action concrète 3 adaptée à la niche"]
}"#;

const TONE: &str = "Sois direct, concret et bienveillant. Réponds en français, uniquement avec \
l'objet JSON, sans texte autour.";

/// Render the full instruction sent to the model along with the image.
///
/// Expert mode uses a fixed rubric and ignores the niche. Niche mode embeds
/// the descriptor fields as they are. The output depends only on the inputs.
#[must_use]
pub fn build_prompt(title: &str, niche: &NicheDescriptor, mode: AnalysisMode) -> String {
    match mode {
        AnalysisMode::Expert => expert_prompt(title),
        AnalysisMode::Niche => niche_prompt(title, niche),
    }
}

fn expert_prompt(title: &str) -> String {
    format!(
        "Tu es un expert YouTube qui analyse les miniatures selon des critères de performance prouvés.

TITRE: \"{title}\"

{EXPERT_RUBRIC}

{TONE}

{EXPERT_SCHEMA}"
    )
}

fn niche_prompt(title: &str, niche: &NicheDescriptor) -> String {
    let NicheDescriptor {
        display_name,
        key_factors,
        expectations,
        common_issues,
        ..
    } = niche;
    format!(
        "Tu es un expert YouTube spécialisé dans la niche « {display_name} ».

TITRE: \"{title}\"

Évalue le potentiel de clic de cette miniature pour la niche {display_name}.

FACTEURS CLÉS DE LA NICHE :
{key_factors}

ATTENTES DU PUBLIC :
{expectations}

ERREURS FRÉQUENTES À REPÉRER :
{common_issues}

Donne un score /10 qui reflète la performance probable face aux autres miniatures de cette niche.

{TONE}

{NICHE_SCHEMA}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve_niche;

    #[test]
    fn identical_inputs_give_identical_prompts() {
        let niche = resolve_niche(Some("gaming"));
        for mode in [AnalysisMode::Expert, AnalysisMode::Niche] {
            assert_eq!(
                build_prompt("Mon titre", niche, mode),
                build_prompt("Mon titre", niche, mode)
            );
        }
    }

    #[test]
    fn title_is_embedded_verbatim() {
        let title = r#"J'ai testé "l'impossible" {vraiment} 😱"#;
        let niche = resolve_niche(None);
        for mode in [AnalysisMode::Expert, AnalysisMode::Niche] {
            let prompt = build_prompt(title, niche, mode);
            assert!(prompt.contains(&format!("TITRE: \"{title}\"")), "{mode:?}");
        }
    }

    #[test]
    fn unknown_niche_prompt_uses_generic_descriptor() {
        let niche = resolve_niche(Some("unknown-niche"));
        let prompt = build_prompt("Great title", niche, AnalysisMode::Niche);
        assert!(prompt.contains("Généraliste"));
        assert!(prompt.contains(niche.key_factors));
        assert!(prompt.contains(niche.expectations));
        assert!(prompt.contains(niche.common_issues));
        assert!(prompt.contains("\"analysisText\""));
    }

    #[test]
    fn expert_prompt_ignores_niche() {
        let gaming = build_prompt("Titre", resolve_niche(Some("gaming")), AnalysisMode::Expert);
        let cooking = build_prompt("Titre", resolve_niche(Some("cuisine")), AnalysisMode::Expert);
        assert_eq!(gaming, cooking);
        assert!(gaming.contains("\"visualFactors\""));
        assert!(gaming.contains("\"ctrEstimate\""));
        assert!(!gaming.contains(resolve_niche(Some("gaming")).key_factors));
    }
}
