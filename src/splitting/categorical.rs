//! Split search over a categorical feature with frequency tables.
use super::{split_impurity, SplitCandidate, SplitTest};
use crate::data::features::{ClassLabel, Target};
use crate::errors::Result;
use crate::proba::{Multinomial, TargetDistribution};
use crate::trees::criterion::Criterion;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct CategoricalSplitter<C: ClassLabel> {
    feature: String,
    template: TargetDistribution<C>,
    categories: HashMap<String, TargetDistribution<C>>,
    class_dists: HashMap<C, Multinomial<String>>,
}

impl<C: ClassLabel> CategoricalSplitter<C> {
    pub fn new(feature: &str, template: TargetDistribution<C>) -> Self {
        Self {
            feature: feature.to_string(),
            template,
            categories: HashMap::new(),
            class_dists: HashMap::new(),
        }
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub fn n_categories(&self) -> usize {
        self.categories.len()
    }

    pub fn update(&mut self, category: &str, target: &Target<C>) -> Result<()> {
        match self.categories.get_mut(category) {
            Some(dist) => dist.update(target)?,
            None => {
                let mut dist = self.template.fresh();
                dist.update(target)?;
                self.categories.insert(category.to_string(), dist);
            }
        }

        if let Target::Class(class) = target {
            self.class_dists
                .entry(class.clone())
                .or_default()
                .update(&category.to_string());
        }
        Ok(())
    }

    /// One `feature = category` candidate per observed category.
    pub fn enumerate_splits(
        &self,
        target_dist: &TargetDistribution<C>,
        criterion: Criterion,
    ) -> Result<Vec<SplitCandidate>> {
        let mut categories = self.categories.iter().collect::<Vec<_>>();
        categories.sort_by(|(a, _), (b, _)| a.cmp(b));

        categories
            .into_iter()
            .map(|(category, left)| -> Result<SplitCandidate> {
                let mut right = target_dist.clone();
                right.subtract(left)?;
                Ok(SplitCandidate {
                    test: SplitTest::Equals {
                        feature: self.feature.clone(),
                        category: category.clone(),
                    },
                    impurity: split_impurity(left, &right, criterion)?,
                })
            })
            .collect()
    }

    pub fn class_distributions(&self) -> impl Iterator<Item = (&C, &Multinomial<String>)> {
        self.class_dists.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_one_candidate_per_category() {
        let mut splitter = CategoricalSplitter::new("color", TargetDistribution::discrete());
        let mut target = TargetDistribution::discrete();
        for (category, label) in [("red", "a"), ("red", "a"), ("blue", "b"), ("green", "b")] {
            splitter.update(category, &Target::Class(label)).unwrap();
            target.update(&Target::Class(label)).unwrap();
        }
        assert_eq!(splitter.n_categories(), 3);

        let candidates = splitter.enumerate_splits(&target, Criterion::Gini).unwrap();
        let categories = candidates
            .iter()
            .map(|candidate| match &candidate.test {
                SplitTest::Equals { category, .. } => category.as_str(),
                _ => unreachable!(),
            })
            .collect::<Vec<_>>();
        assert_eq!(categories, vec!["blue", "green", "red"]);

        // red vs rest is a perfect split
        assert_abs_diff_eq!(candidates[2].impurity, 0.0);
        assert!(candidates[0].impurity > 0.0);
    }

    #[test]
    fn test_single_category_still_proposes_a_split() {
        let mut splitter = CategoricalSplitter::new("color", TargetDistribution::discrete());
        let mut target = TargetDistribution::discrete();
        for label in ["a", "b"] {
            splitter.update("red", &Target::Class(label)).unwrap();
            target.update(&Target::Class(label)).unwrap();
        }

        let candidates = splitter.enumerate_splits(&target, Criterion::Gini).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_abs_diff_eq!(candidates[0].impurity, 0.5);
    }

    #[test]
    fn test_class_distributions() {
        let mut splitter = CategoricalSplitter::new("color", TargetDistribution::discrete());
        splitter.update("red", &Target::Class("a")).unwrap();
        splitter.update("blue", &Target::Class("a")).unwrap();
        splitter.update("red", &Target::Class("b")).unwrap();

        let dists: HashMap<_, _> = splitter.class_distributions().collect();
        assert_abs_diff_eq!(dists[&"a"].pmf(&"red".to_string()), 0.5);
        assert_abs_diff_eq!(dists[&"b"].pmf(&"red".to_string()), 1.0);
        assert_eq!(dists[&"b"].pmf(&"blue".to_string()), 0.0);
    }
}
