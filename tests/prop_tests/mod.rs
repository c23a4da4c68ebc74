mod substitution;
