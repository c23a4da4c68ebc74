mod prop_substitution;
