/// Resultado de buscar una sola entidad por id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
  Found(T),
  NotFound,
}
